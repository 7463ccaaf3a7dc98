use grid_link::{ Grid, GetterScope, PluginDescriptor, Row, Column, SlotPosition, Value };

fn contributor( name: &str, content: &'static str ) -> PluginDescriptor {
    PluginDescriptor::new( name )
        .with_template( "toolbar", SlotPosition::Default, move | _: &GetterScope | {
            Ok( Value::from( content ))
        })
}

fn contents( grid: &Grid, slot: &str ) -> Vec<Value> {
    grid.render_slot( slot ).unwrap()
        .into_iter()
        .map(| entry | entry.content().clone() )
        .collect()
}

#[test]
fn slot_content_follows_resolution_order() {

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );

    grid.mount([ contributor( "One", "one" ), contributor( "Two", "two" )]).unwrap();
    assert_eq!( contents( &grid, "toolbar" ), [ Value::from( "one" ), Value::from( "two" )]);

    // Remounting in the other order reorders the slot.
    grid.mount([ contributor( "Two", "two" ), contributor( "One", "one" )]).unwrap();
    assert_eq!( contents( &grid, "toolbar" ), [ Value::from( "two" ), Value::from( "one" )]);

}

#[test]
fn unknown_slots_render_empty() {

    let grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    assert!( grid.render_slot( "statusBar" ).unwrap().is_empty() );

}

#[test]
fn templates_read_getters_at_render_time() {

    let provider = PluginDescriptor::new( "Provider" )
        .with_getter( "label", | _: &GetterScope | Ok( Value::from( "computed" )))
        .with_template( "toolbar", SlotPosition::Default, | scope: &GetterScope | {
            scope.value( "label" )
        });

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ provider ]).unwrap();

    let rendered = grid.render_slot( "toolbar" ).unwrap();
    assert_eq!( rendered.len(), 1 );
    assert_eq!( rendered[ 0 ].plugin(), "Provider" );
    assert_eq!( rendered[ 0 ].content(), &Value::from( "computed" ));

}
