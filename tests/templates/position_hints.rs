use grid_link::{ Grid, GetterScope, PluginDescriptor, Row, Column, SlotPosition, Value };

fn contributor( name: &str, position: SlotPosition, content: &'static str ) -> PluginDescriptor {
    PluginDescriptor::new( name )
        .with_template( "header", position, move | _: &GetterScope | Ok( Value::from( content )))
}

fn contents( grid: &Grid ) -> Vec<Value> {
    grid.render_slot( "header" ).unwrap()
        .into_iter()
        .map(| entry | entry.content().clone() )
        .collect()
}

#[test]
fn first_and_last_hints_bracket_the_defaults() {

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([
        contributor( "Footer", SlotPosition::Last, "footer" ),
        contributor( "Banner", SlotPosition::First, "banner" ),
        contributor( "Body", SlotPosition::Default, "body" ),
    ]).unwrap();

    assert_eq!( contents( &grid ), [
        Value::from( "banner" ),
        Value::from( "body" ),
        Value::from( "footer" ),
    ]);

}

#[test]
fn after_hints_resolve_against_current_contributors() {

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([
        contributor( "Heading", SlotPosition::First, "heading" ),
        contributor( "Body", SlotPosition::Default, "body" ),
        contributor( "Badge", SlotPosition::After( "Heading".to_string() ), "badge" ),
    ]).unwrap();

    assert_eq!( contents( &grid ), [
        Value::from( "heading" ),
        Value::from( "badge" ),
        Value::from( "body" ),
    ]);

    // Remount without the target: the hint falls back to the unhinted region.
    grid.mount([
        contributor( "Body", SlotPosition::Default, "body" ),
        contributor( "Footer", SlotPosition::Last, "footer" ),
        contributor( "Badge", SlotPosition::After( "Heading".to_string() ), "badge" ),
    ]).unwrap();

    assert_eq!( contents( &grid ), [
        Value::from( "body" ),
        Value::from( "badge" ),
        Value::from( "footer" ),
    ]);

}
