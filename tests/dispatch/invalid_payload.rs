use grid_link::{ DispatchError, Grid, StateSource, Value };
use grid_link::plugins::{ sorting_state, table, table_column_reordering };

use crate::fixtures ;

#[test]
fn reordering_an_absent_column_is_rejected() {

    let mut grid = Grid::new( fixtures::demo_rows( 2 ), fixtures::demo_columns() );
    grid.mount([
        table(),
        table_column_reordering( StateSource::uncontrolled( Value::List( vec![] ))),
    ]).unwrap();

    let error = grid.dispatch( "changeColumnOrder", Value::record([
        ( "order", Value::list([ Value::from( "name" ), Value::from( "salary" )])),
    ])).unwrap_err();

    match error {
        DispatchError::InvalidPayload { action, reason } => {
            assert_eq!( action, "changeColumnOrder" );
            assert!( reason.contains( "salary" ), "unexpected reason: {}", reason );
        }
        other => panic!( "Expected InvalidPayload, found: {:?}", other ),
    }

    // Nothing was committed.
    assert_eq!( grid.read_slice( "columnOrder" ), Some( Value::List( vec![] )));

}

#[test]
fn malformed_sorting_payloads_are_rejected() {

    let mut grid = Grid::new( fixtures::demo_rows( 2 ), fixtures::demo_columns() );
    grid.mount([ sorting_state( StateSource::uncontrolled( Value::List( vec![] )))]).unwrap();

    // Missing columnName.
    assert!( matches!(
        grid.dispatch( "changeSorting", Value::Null ),
        Err( DispatchError::InvalidPayload { .. }),
    ));

    // Unknown direction.
    assert!( matches!(
        grid.dispatch( "changeSorting", Value::record([
            ( "columnName", Value::from( "name" )),
            ( "direction", Value::from( "sideways" )),
        ])),
        Err( DispatchError::InvalidPayload { .. }),
    ));

}
