//! Dynamic value model shared by every grid contract.
//!
//! Getters, state slices, action payloads, and template content all exchange
//! [`Value`]s. The enum is closed: plugins agree on shapes by convention
//! (documented per getter/action), not by downcasting. Domain-shaped variants
//! exist for the collections every grid deals in - [`Row`]s, [`Column`]s, and
//! the layout-annotated [`TableColumn`]s.

use std::collections::BTreeMap ;



/// A dynamically shaped value exchanged between plugins, state, and views.
#[derive( Debug, Clone, PartialEq, Default )]
pub enum Value {
    /// The absence of a value.
    #[default] Null,
    /// A boolean flag.
    Bool( bool ),
    /// A signed integer.
    Int( i64 ),
    /// A floating point number.
    Float( f64 ),
    /// A piece of text.
    Text( String ),
    /// An ordered sequence of values.
    List( Vec<Value> ),
    /// String-keyed fields, ordered by key.
    Record( BTreeMap<String, Value> ),
    /// A row collection.
    Rows( Vec<Row> ),
    /// A column collection.
    Columns( Vec<Column> ),
    /// A layout-annotated column collection.
    TableColumns( Vec<TableColumn> ),
}

impl Value {

    /// Builds a [`Value::Record`] from `( key, value )` entries.
    pub fn record<K: Into<String>>( entries: impl IntoIterator<Item = ( K, Value )> ) -> Self {
        Self::Record( entries.into_iter().map(|( key, value )| ( key.into(), value )).collect() )
    }

    /// Builds a [`Value::List`] from values.
    pub fn list( values: impl IntoIterator<Item = Value> ) -> Self {
        Self::List( values.into_iter().collect() )
    }

    /// Returns `true` if this value is [`Value::Null`].
    #[inline] pub fn is_null( &self ) -> bool { matches!( self, Self::Null )}

    /// The boolean behind [`Value::Bool`], if that's what this is.
    #[inline] pub fn as_bool( &self ) -> Option<bool> { match self {
        Self::Bool( flag ) => Some( *flag ),
        _ => None,
    }}

    /// The integer behind [`Value::Int`], if that's what this is.
    #[inline] pub fn as_int( &self ) -> Option<i64> { match self {
        Self::Int( number ) => Some( *number ),
        _ => None,
    }}

    /// The number behind [`Value::Float`] or [`Value::Int`], widened to `f64`.
    #[inline] pub fn as_float( &self ) -> Option<f64> { match self {
        Self::Float( number ) => Some( *number ),
        #[allow( clippy::cast_precision_loss )]
        Self::Int( number ) => Some( *number as f64 ),
        _ => None,
    }}

    /// The text behind [`Value::Text`], if that's what this is.
    #[inline] pub fn as_text( &self ) -> Option<&str> { match self {
        Self::Text( text ) => Some( text ),
        _ => None,
    }}

    /// The values behind [`Value::List`], if that's what this is.
    #[inline] pub fn as_list( &self ) -> Option<&[Value]> { match self {
        Self::List( values ) => Some( values ),
        _ => None,
    }}

    /// The fields behind [`Value::Record`], if that's what this is.
    #[inline] pub fn as_record( &self ) -> Option<&BTreeMap<String, Value>> { match self {
        Self::Record( fields ) => Some( fields ),
        _ => None,
    }}

    /// The rows behind [`Value::Rows`], if that's what this is.
    #[inline] pub fn as_rows( &self ) -> Option<&[Row]> { match self {
        Self::Rows( rows ) => Some( rows ),
        _ => None,
    }}

    /// The columns behind [`Value::Columns`], if that's what this is.
    #[inline] pub fn as_columns( &self ) -> Option<&[Column]> { match self {
        Self::Columns( columns ) => Some( columns ),
        _ => None,
    }}

    /// The columns behind [`Value::TableColumns`], if that's what this is.
    #[inline] pub fn as_table_columns( &self ) -> Option<&[TableColumn]> { match self {
        Self::TableColumns( columns ) => Some( columns ),
        _ => None,
    }}

    /// Looks up a field of a [`Value::Record`] by key.
    ///
    /// Returns `None` both when the key is absent and when this isn't a record.
    #[inline] pub fn get( &self, key: &str ) -> Option<&Value> {
        self.as_record().and_then(| fields | fields.get( key ))
    }

    /// Totally orders two values for sorting purposes.
    ///
    /// Values of different shapes order by shape (nulls first, then booleans,
    /// numbers, text); numbers compare across [`Value::Int`]/[`Value::Float`].
    /// Shapes with no meaningful order compare equal, which keeps sorts stable.
    pub fn compare( &self, other: &Value ) -> std::cmp::Ordering {
        use std::cmp::Ordering ;
        match ( self.rank(), other.rank() ) {
            ( left, right ) if left != right => left.cmp( &right ),
            _ => match ( self, other ) {
                ( Self::Bool( left ), Self::Bool( right )) => left.cmp( right ),
                ( Self::Text( left ), Self::Text( right )) => left.cmp( right ),
                _ => match ( self.as_float(), other.as_float() ) {
                    ( Some( left ), Some( right )) => left.total_cmp( &right ),
                    _ => Ordering::Equal,
                },
            },
        }
    }

    fn rank( &self ) -> u8 { match self {
        Self::Null => 0,
        Self::Bool( _ ) => 1,
        Self::Int( _ ) | Self::Float( _ ) => 2,
        Self::Text( _ ) => 3,
        Self::List( _ ) => 4,
        Self::Record( _ ) => 5,
        Self::Rows( _ ) => 6,
        Self::Columns( _ ) => 7,
        Self::TableColumns( _ ) => 8,
    }}

}

impl std::fmt::Display for Value {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool( flag ) => write!( f, "{}", flag ),
            Self::Int( number ) => write!( f, "{}", number ),
            Self::Float( number ) => write!( f, "{}", number ),
            Self::Text( text ) => write!( f, "{}", text ),
            Self::List( values ) => {
                for ( index, value ) in values.iter().enumerate() {
                    if index > 0 { write!( f, ", " )?; }
                    write!( f, "{}", value )?;
                }
                Ok(())
            }
            Self::Record( fields ) => {
                for ( index, ( key, value )) in fields.iter().enumerate() {
                    if index > 0 { write!( f, ", " )?; }
                    write!( f, "{}: {}", key, value )?;
                }
                Ok(())
            }
            Self::Rows( rows ) => write!( f, "{} row(s)", rows.len() ),
            Self::Columns( columns ) => write!( f, "{} column(s)", columns.len() ),
            Self::TableColumns( columns ) => write!( f, "{} table column(s)", columns.len() ),
        }
    }
}

impl From<bool> for Value { fn from( flag: bool ) -> Self { Self::Bool( flag )}}
impl From<i64> for Value { fn from( number: i64 ) -> Self { Self::Int( number )}}
impl From<f64> for Value { fn from( number: f64 ) -> Self { Self::Float( number )}}
impl From<&str> for Value { fn from( text: &str ) -> Self { Self::Text( text.to_string() )}}
impl From<String> for Value { fn from( text: String ) -> Self { Self::Text( text )}}
impl From<Vec<Value>> for Value { fn from( values: Vec<Value> ) -> Self { Self::List( values )}}
impl From<Vec<Row>> for Value { fn from( rows: Vec<Row> ) -> Self { Self::Rows( rows )}}
impl From<Vec<Column>> for Value { fn from( columns: Vec<Column> ) -> Self { Self::Columns( columns )}}
impl From<Vec<TableColumn>> for Value { fn from( columns: Vec<TableColumn> ) -> Self { Self::TableColumns( columns )}}



const NULL: Value = Value::Null ;

/// A single grid row: cell values keyed by column name.
#[derive( Debug, Clone, PartialEq, Default )]
pub struct Row {
    cells: BTreeMap<String, Value>,
}

impl Row {

    /// Builds a row from `( column name, cell value )` entries.
    pub fn new<K: Into<String>>( cells: impl IntoIterator<Item = ( K, Value )> ) -> Self {
        Self { cells: cells.into_iter().map(|( name, value )| ( name.into(), value )).collect() }
    }

    /// The cell value for `column`, if the row has one.
    #[inline] pub fn get( &self, column: &str ) -> Option<&Value> { self.cells.get( column )}

    /// Like [`get`]( Self::get ), but absent cells read as [`Value::Null`].
    #[inline] pub fn cell( &self, column: &str ) -> &Value { self.cells.get( column ).unwrap_or( &NULL )}

    /// All cells, keyed by column name.
    #[inline] pub fn cells( &self ) -> &BTreeMap<String, Value> { &self.cells }

}

/// A column as supplied by the embedding application.
#[derive( Debug, Clone, PartialEq )]
pub struct Column {
    /// Unique column name, referenced by plugins and payloads
    name: String,
    /// Optional human-readable caption
    title: Option<String>,
}

impl Column {

    /// Creates a column with the given unique name.
    pub fn new( name: impl Into<String> ) -> Self {
        Self { name: name.into(), title: None }
    }

    /// Sets a human-readable caption.
    pub fn with_title( mut self, title: impl Into<String> ) -> Self {
        self.title = Some( title.into() );
        self
    }

    /// Unique column name.
    #[inline] pub fn name( &self ) -> &str { &self.name }

    /// Human-readable caption, if one was set.
    #[inline] pub fn title( &self ) -> Option<&str> { self.title.as_deref() }

}

/// A column annotated with table layout data.
///
/// Produced by the `tableColumns` getter chain: the base table plugin projects
/// every [`Column`] into one of these, and downstream plugins (reordering,
/// resizing) decorate the collection.
#[derive( Debug, Clone, PartialEq )]
pub struct TableColumn {
    column: Column,
    width: Option<f64>,
}

impl TableColumn {

    /// Wraps a column with no layout annotations.
    pub fn new( column: Column ) -> Self {
        Self { column, width: None }
    }

    /// Sets the rendered width.
    pub fn with_width( mut self, width: f64 ) -> Self {
        self.width = Some( width );
        self
    }

    /// The underlying column.
    #[inline] pub fn column( &self ) -> &Column { &self.column }

    /// Unique column name (shorthand for `column().name()`).
    #[inline] pub fn name( &self ) -> &str { self.column.name() }

    /// The rendered width, if any plugin assigned one.
    #[inline] pub fn width( &self ) -> Option<f64> { self.width }

}
