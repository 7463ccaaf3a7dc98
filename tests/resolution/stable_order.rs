use grid_link::{ resolve, PluginDescriptor };

fn names( descriptors: &[PluginDescriptor], order: &[usize] ) -> Vec<String> {
    order.iter().map(| &index | descriptors[ index ].name().to_string() ).collect()
}

#[test]
fn dependencies_come_first() {

    let descriptors = vec![
        PluginDescriptor::new( "Paging" ).after( "Sorting" ).after( "Filtering" ),
        PluginDescriptor::new( "Filtering" ),
        PluginDescriptor::new( "Sorting" ).after( "Filtering" ),
    ];

    let order = resolve( &descriptors ).unwrap();
    assert_eq!( names( &descriptors, &order ), [ "Filtering", "Sorting", "Paging" ]);

}

#[test]
fn ties_preserve_registration_order() {

    // No constraints at all: resolution order is registration order.
    let independent = vec![
        PluginDescriptor::new( "C" ),
        PluginDescriptor::new( "A" ),
        PluginDescriptor::new( "B" ),
    ];
    let order = resolve( &independent ).unwrap();
    assert_eq!( names( &independent, &order ), [ "C", "A", "B" ]);

    // One constraint: only the constrained pair reorders.
    let descriptors = vec![
        PluginDescriptor::new( "C" ).after( "B" ),
        PluginDescriptor::new( "A" ),
        PluginDescriptor::new( "B" ),
    ];
    let order = resolve( &descriptors ).unwrap();
    assert_eq!( names( &descriptors, &order ), [ "A", "B", "C" ]);

}

#[test]
fn before_constraints_are_honored() {

    let descriptors = vec![
        PluginDescriptor::new( "Watcher" ),
        PluginDescriptor::new( "Provider" ).before( "Watcher" ),
    ];
    let order = resolve( &descriptors ).unwrap();
    assert_eq!( names( &descriptors, &order ), [ "Provider", "Watcher" ]);

}

#[test]
fn resolution_is_deterministic() {

    let build = || vec![
        PluginDescriptor::new( "D" ).after( "B" ).after( "C" ),
        PluginDescriptor::new( "C" ).after( "A" ),
        PluginDescriptor::new( "B" ).after( "A" ),
        PluginDescriptor::new( "A" ),
    ];

    let first = resolve( &build() ).unwrap();
    for _ in 0..16 {
        assert_eq!( resolve( &build() ).unwrap(), first );
    }

}
