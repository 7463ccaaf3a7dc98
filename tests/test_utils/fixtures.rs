#[allow( dead_code )]
mod fixtures {

    use std::cell::RefCell ;
    use std::rc::Rc ;

    use once_cell::sync::Lazy ;

    use grid_link::{ Column, Row, Value };

    const NAMES: &[&str] = &[ "Sandra", "Dustin", "Sheri", "Stanley", "Nicole", "Betty", "Emmett", "Teresa" ];
    const SEXES: &[&str] = &[ "Female", "Male" ];
    const CITIES: &[&str] = &[ "Austin", "Chicago", "Tokyo", "Paris", "Rio de Janeiro", "Las Vegas" ];
    const CARS: &[&str] = &[ "Audi A4", "BMW 750", "Chevrolet Cruze", "Honda Accord", "Toyota Corolla" ];

    /// The six-record demo set used by the end-to-end scenarios.
    pub static SIX_ROWS: Lazy<Vec<Row>> = Lazy::new(|| demo_rows( 6 ));

    pub fn demo_columns() -> Vec<Column> {
        vec![
            Column::new( "name" ).with_title( "Name" ),
            Column::new( "sex" ).with_title( "Sex" ),
            Column::new( "city" ).with_title( "City" ),
            Column::new( "car" ).with_title( "Car" ),
        ]
    }

    /// Deterministic demo records cycling through fixed value pools.
    pub fn demo_rows( length: usize ) -> Vec<Row> {
        ( 0..length )
            .map(| index | Row::new([
                ( "id", Value::Int( index as i64 )),
                ( "name", Value::from( NAMES[ index % NAMES.len() ])),
                ( "sex", Value::from( SEXES[ index % SEXES.len() ])),
                ( "city", Value::from( CITIES[ index % CITIES.len() ])),
                ( "car", Value::from( CARS[ index % CARS.len() ])),
            ]))
            .collect()
    }

    /// A change callback that records every value it is invoked with.
    pub fn collector() -> ( Rc<RefCell<Vec<Value>>>, impl Fn( &Value ) + 'static ) {
        let seen = Rc::new( RefCell::new( Vec::new() ));
        let sink = Rc::clone( &seen );
        ( seen, move | value: &Value | sink.borrow_mut().push( value.clone() ))
    }

    /// Column names of a `columns`/`tableColumns` getter value, for order asserts.
    pub fn column_names( value: &Value ) -> Vec<String> {
        match value {
            Value::Columns( columns ) =>
                columns.iter().map(| column | column.name().to_string() ).collect(),
            Value::TableColumns( columns ) =>
                columns.iter().map(| column | column.name().to_string() ).collect(),
            other => panic!( "expected a column collection, found: {:?}", other ),
        }
    }

    /// Cell values of one column across a `rows` getter value.
    pub fn column_cells( value: &Value, column: &str ) -> Vec<Value> {
        value.as_rows()
            .expect( "expected a row collection" )
            .iter()
            .map(| row | row.cell( column ).clone() )
            .collect()
    }

}
