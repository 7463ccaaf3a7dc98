use grid_link::{ resolve, Grid, PluginDescriptor, ResolveError, Row, Column };
use grid_link::plugins::table ;

#[test]
fn required_dependency_on_absent_plugin_fails() {

    let descriptors = vec![
        PluginDescriptor::new( "TableHeaderRow" ).after( "Table" ),
    ];

    match resolve( &descriptors ) {
        Err( ResolveError::MissingDependency { plugin, dependency }) => {
            assert_eq!( plugin, "TableHeaderRow" );
            assert_eq!( dependency, "Table" );
        }
        other => panic!( "Expected MissingDependency, found: {:?}", other ),
    }

}

#[test]
fn failed_mount_keeps_the_previous_plugin_set() {

    let mut grid = Grid::new(
        Vec::<Row>::new(),
        vec![ Column::new( "name" )],
    );
    grid.mount([ table() ]).unwrap();

    let result = grid.mount([ PluginDescriptor::new( "Orphan" ).after( "Absent" )]);
    assert!( matches!( result, Err( ResolveError::MissingDependency { .. })));

    // The earlier set is still in force: Table's getter keeps resolving.
    let columns = grid.get_value( "tableColumns" ).unwrap();
    assert_eq!( columns.as_table_columns().map( <[_]>::len ), Some( 1 ));

}

#[test]
fn absent_before_target_is_vacuous() {

    let descriptors = vec![
        PluginDescriptor::new( "Provider" ).before( "NotMounted" ),
    ];
    assert_eq!( resolve( &descriptors ).unwrap(), [ 0 ]);

}
