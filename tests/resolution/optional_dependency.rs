use grid_link::{ resolve, PluginDescriptor };

fn names( descriptors: &[PluginDescriptor], order: &[usize] ) -> Vec<String> {
    order.iter().map(| &index | descriptors[ index ].name().to_string() ).collect()
}

#[test]
fn optional_dependency_on_absent_plugin_is_skipped() {

    let descriptors = vec![
        PluginDescriptor::new( "Reordering" ).after_optional( "DragDropContext" ),
    ];
    assert_eq!( resolve( &descriptors ).unwrap(), [ 0 ]);

}

#[test]
fn optional_dependency_orders_when_present() {

    let descriptors = vec![
        PluginDescriptor::new( "Reordering" ).after_optional( "DragDropContext" ),
        PluginDescriptor::new( "DragDropContext" ),
    ];
    let order = resolve( &descriptors ).unwrap();
    assert_eq!( names( &descriptors, &order ), [ "DragDropContext", "Reordering" ]);

}
