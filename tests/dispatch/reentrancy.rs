use std::cell::{ Cell, RefCell };
use std::rc::Rc ;

use grid_link::{
    ActionState, DispatchError, Grid, GetterScope, PluginDescriptor, Row, Column,
    StateSource, Value,
};

type GridSlot = Rc<RefCell<Option<Rc<Grid>>>>;

#[test]
fn dispatch_from_within_a_handler_is_rejected() {

    let slot: GridSlot = Rc::new( RefCell::new( None ));
    let rejected = Rc::new( Cell::new( false ));

    let plugin = {
        let slot = Rc::clone( &slot );
        let rejected = Rc::clone( &rejected );
        PluginDescriptor::new( "Reentrant" )
            .with_slice( "marker", StateSource::uncontrolled( Value::Null ))
            .with_action( "poke", move | state: &mut ActionState, _: &Value, _: &GetterScope | {
                if let Some( grid ) = slot.borrow().as_ref() {
                    let error = grid.dispatch( "poke", Value::Null ).unwrap_err();
                    rejected.set( matches!( error, DispatchError::ReentrantDispatch ));
                }
                state.set( "marker", Value::Bool( true ));
                Ok(())
            })
    };

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ plugin ]).unwrap();
    let grid = Rc::new( grid );
    *slot.borrow_mut() = Some( Rc::clone( &grid ));

    grid.dispatch( "poke", Value::Null ).unwrap();

    assert!( rejected.get() );
    // The outer dispatch itself committed normally.
    assert_eq!( grid.read_slice( "marker" ), Some( Value::Bool( true )));

}

#[test]
fn getter_reads_from_within_a_handler_are_fine() {

    let plugin = PluginDescriptor::new( "Reader" )
        .with_slice( "marker", StateSource::uncontrolled( Value::Int( 3 )))
        .with_getter( "marker", | scope: &GetterScope | {
            Ok( scope.slice( "marker" ).unwrap_or_default() )
        })
        .with_getter( "derived", | scope: &GetterScope | scope.value( "marker" ))
        .with_action( "poke", | state: &mut ActionState, _: &Value, scope: &GetterScope | {
            // Re-entrant getter evaluation, including a nested chain.
            let derived = scope.value( "derived" )?;
            state.set( "marker", derived );
            Ok(())
        });

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ plugin ]).unwrap();
    grid.dispatch( "poke", Value::Null ).unwrap();
    assert_eq!( grid.read_slice( "marker" ), Some( Value::Int( 3 )));

}

#[test]
fn dispatch_from_a_change_handler_is_rejected() {

    let slot: GridSlot = Rc::new( RefCell::new( None ));
    let rejected = Rc::new( Cell::new( false ));

    let on_change = {
        let slot = Rc::clone( &slot );
        let rejected = Rc::clone( &rejected );
        move | _: &Value | {
            if let Some( grid ) = slot.borrow().as_ref() {
                let error = grid.dispatch( "poke", Value::Null ).unwrap_err();
                rejected.set( matches!( error, DispatchError::ReentrantDispatch ));
            }
        }
    };

    let plugin = PluginDescriptor::new( "Notified" )
        .with_slice( "marker", StateSource::uncontrolled_with( Value::Null, on_change ))
        .with_action( "poke", | state: &mut ActionState, _: &Value, _: &GetterScope | {
            state.set( "marker", Value::Bool( true ));
            Ok(())
        });

    let mut grid = Grid::new( Vec::<Row>::new(), Vec::<Column>::new() );
    grid.mount([ plugin ]).unwrap();
    let grid = Rc::new( grid );
    *slot.borrow_mut() = Some( Rc::clone( &grid ));

    grid.dispatch( "poke", Value::Null ).unwrap();
    assert!( rejected.get() );

}
