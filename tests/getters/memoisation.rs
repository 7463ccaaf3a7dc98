use std::cell::Cell ;
use std::rc::Rc ;

use grid_link::{
    ActionState, Grid, GetterScope, PluginDescriptor, Row, Column, StateSource, Value,
};

fn counting_source( evaluations: &Rc<Cell<usize>> ) -> PluginDescriptor {
    let evaluations = Rc::clone( evaluations );
    PluginDescriptor::new( "Source" )
        .with_slice( "seed", StateSource::uncontrolled( Value::Int( 7 )))
        .with_getter( "shared", move | scope: &GetterScope | {
            evaluations.set( evaluations.get() + 1 );
            Ok( scope.slice( "seed" ).unwrap_or_default() )
        })
        .with_action( "reseed", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            state.set( "seed", payload.clone() );
            Ok(())
        })
}

#[test]
fn diamond_dependencies_evaluate_once_per_cycle() {

    let evaluations = Rc::new( Cell::new( 0 ));

    let left = PluginDescriptor::new( "Left" )
        .after( "Source" )
        .with_getter( "left", | scope: &GetterScope | scope.value( "shared" ));
    let right = PluginDescriptor::new( "Right" )
        .after( "Source" )
        .with_getter( "right", | scope: &GetterScope | scope.value( "shared" ));

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ counting_source( &evaluations ), left, right ]).unwrap();

    assert_eq!( grid.get_value( "left" ).unwrap(), Value::Int( 7 ));
    assert_eq!( grid.get_value( "right" ).unwrap(), Value::Int( 7 ));
    assert_eq!( grid.get_value( "shared" ).unwrap(), Value::Int( 7 ));
    assert_eq!( evaluations.get(), 1 );

}

#[test]
fn commit_invalidates_the_cycle_cache() {

    let evaluations = Rc::new( Cell::new( 0 ));

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ counting_source( &evaluations )]).unwrap();

    assert_eq!( grid.get_value( "shared" ).unwrap(), Value::Int( 7 ));
    assert_eq!( grid.get_value( "shared" ).unwrap(), Value::Int( 7 ));
    assert_eq!( evaluations.get(), 1 );

    grid.dispatch( "reseed", Value::Int( 12 )).unwrap();

    assert_eq!( grid.get_value( "shared" ).unwrap(), Value::Int( 12 ));
    assert_eq!( evaluations.get(), 2 );

}
