use grid_link::{
    ActionState, Grid, GetterScope, PluginDescriptor, Row, Column, StateSource, Value,
};

fn appender( name: &str, marker: i64 ) -> PluginDescriptor {
    PluginDescriptor::new( name )
        .with_action( "record", move | state: &mut ActionState, _: &Value, _: &GetterScope | {
            let mut trail: Vec<Value> = state.get( "trail" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            trail.push( Value::Int( marker ));
            state.set( "trail", Value::List( trail ));
            Ok(())
        })
}

#[test]
fn action_handling_is_a_left_fold_in_resolution_order() {

    let owner = PluginDescriptor::new( "Owner" )
        .with_slice( "trail", StateSource::uncontrolled( Value::List( vec![] )));

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([
        owner,
        appender( "Third", 3 ).after( "Second" ),
        appender( "First", 1 ),
        appender( "Second", 2 ).after( "First" ),
    ]).unwrap();

    grid.dispatch( "record", Value::Null ).unwrap();

    // Each contributor saw the previous one's state: the trail is ordered.
    assert_eq!(
        grid.read_slice( "trail" ),
        Some( Value::list([ Value::Int( 1 ), Value::Int( 2 ), Value::Int( 3 )])),
    );

}

#[test]
fn sequential_dispatches_commit_in_sequence() {

    let owner = PluginDescriptor::new( "Owner" )
        .with_slice( "trail", StateSource::uncontrolled( Value::List( vec![] )));

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ owner, appender( "Only", 9 )]).unwrap();

    grid.dispatch( "record", Value::Null ).unwrap();
    grid.dispatch( "record", Value::Null ).unwrap();

    assert_eq!(
        grid.read_slice( "trail" ),
        Some( Value::list([ Value::Int( 9 ), Value::Int( 9 )])),
    );

}

#[test]
fn handlers_read_getters_from_the_pre_dispatch_cycle() {

    let owner = PluginDescriptor::new( "Owner" )
        .with_slice( "count", StateSource::uncontrolled( Value::Int( 5 )))
        .with_getter( "count", | scope: &GetterScope | {
            Ok( scope.slice( "count" ).unwrap_or_default() )
        })
        .with_action( "bump", | state: &mut ActionState, _: &Value, scope: &GetterScope | {
            // The getter still reports the pre-dispatch value even after a
            // staged write; only the folded state sees it.
            let staged = state.get( "count" ).and_then( Value::as_int ).unwrap_or( 0 );
            state.set( "count", Value::Int( staged + 1 ));
            assert_eq!( scope.value( "count" ).unwrap(), Value::Int( 5 ));
            Ok(())
        });

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ owner ]).unwrap();

    grid.dispatch( "bump", Value::Null ).unwrap();
    assert_eq!( grid.read_slice( "count" ), Some( Value::Int( 6 )));
    assert_eq!( grid.get_value( "count" ).unwrap(), Value::Int( 6 ));

}
