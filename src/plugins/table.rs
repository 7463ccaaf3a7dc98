//! Table layout plugins.
//!
//! [`table`] projects the mounted columns into the `tableColumns` getter and
//! the visible rows into `tableRows`; the other plugins decorate those
//! projections - reordering, resizing, header row, drag-and-drop context,
//! and virtual scrolling. Everything that draws pixels lives in theme crates;
//! here a "template" is structured content describing what to draw.

use std::collections::BTreeMap ;

use itertools::Itertools ;

use crate::descriptor::PluginDescriptor ;
use crate::graph::{ ActionState, DispatchError, GetterScope };
use crate::state::StateSource ;
use crate::template::SlotPosition ;
use crate::value::{ Column, TableColumn, Value };

use super::payload ;



/// The base table surface.
///
/// - Getter `tableColumns`: the mounted columns projected to
///   [`TableColumn`]s, for downstream decoration.
/// - Getter `tableRows`: the visible rows (whatever the `rows` chain
///   produced upstream).
/// - Slot `table`: `{ columns, rows }` content for the theme's table
///   component.
pub fn table() -> PluginDescriptor {
    PluginDescriptor::new( "Table" )
        .with_getter( "tableColumns", | scope: &GetterScope | {
            let columns = scope.value( "columns" )?;
            match columns.as_columns() {
                Some( columns ) => Ok( Value::TableColumns(
                    columns.iter().cloned().map( TableColumn::new ).collect(),
                )),
                None => Ok( columns ),
            }
        })
        .with_getter( "tableRows", | scope: &GetterScope | scope.value( "rows" ))
        .with_template( "table", SlotPosition::Default, | scope: &GetterScope | Ok( Value::record([
            ( "columns", scope.value( "tableColumns" )? ),
            ( "rows", scope.value( "tableRows" )? ),
        ])))
}

/// A heading row over the table's columns.
///
/// - Getter `tableHeaderRows`: a list of `{ columnName, title }` records in
///   `tableColumns` order.
/// - Slot `header`: the same content, placed before other header
///   contributors.
pub fn table_header_row() -> PluginDescriptor {
    PluginDescriptor::new( "TableHeaderRow" )
        .after( "Table" )
        .with_getter( "tableHeaderRows", | scope: &GetterScope | {
            let table_columns = scope.value( "tableColumns" )?;
            let columns = table_columns.as_table_columns().unwrap_or( &[] );
            Ok( Value::list( columns.iter().map(| column | Value::record([
                ( "columnName", Value::Text( column.name().to_string() )),
                ( "title", column.column().title()
                    .map_or( Value::Null, | title | Value::Text( title.to_string() ))),
            ]))))
        })
        .with_template( "header", SlotPosition::First, | scope: &GetterScope | {
            scope.value( "tableHeaderRows" )
        })
}

/// User-driven column reordering.
///
/// - Slice `columnOrder`: a list of column names, outermost order first.
/// - Decorates `columns` and `tableColumns`: listed columns come first in
///   list order, unlisted ones keep their upstream relative order after
///   them. An empty order is the identity.
/// - Action `changeColumnOrder` with payload `{ order }`: replaces the
///   order. Naming a column absent from the column set is rejected as an
///   invalid payload.
pub fn table_column_reordering( order: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "TableColumnReordering" )
        .after( "Table" )
        .after_optional( "DragDropContext" )
        .with_slice( "columnOrder", order )
        .with_getter( "columns", | scope: &GetterScope | {
            let upstream = scope.value( "columns" )?;
            let order = scope.slice( "columnOrder" ).unwrap_or_default();
            match upstream.as_columns() {
                Some( columns ) => Ok( Value::Columns(
                    apply_order( columns, order.as_list().unwrap_or( &[] ), | column: &Column | column.name() ),
                )),
                None => Ok( upstream ),
            }
        })
        .with_getter( "tableColumns", | scope: &GetterScope | {
            let upstream = scope.value( "tableColumns" )?;
            let order = scope.slice( "columnOrder" ).unwrap_or_default();
            match upstream.as_table_columns() {
                Some( columns ) => Ok( Value::TableColumns(
                    apply_order( columns, order.as_list().unwrap_or( &[] ), | column: &TableColumn | column.name() ),
                )),
                None => Ok( upstream ),
            }
        })
        .with_action( "changeColumnOrder", | state: &mut ActionState, payload: &Value, scope: &GetterScope | {
            let order = payload::field( payload, "changeColumnOrder", "order" )?;
            let order = order.as_list().ok_or_else(|| {
                DispatchError::invalid_payload( "changeColumnOrder", "field 'order' must be a list" )
            })?;
            let columns = scope.value( "columns" )?;
            let known: Vec<&str> = columns.as_columns()
                .unwrap_or( &[] )
                .iter()
                .map( Column::name )
                .collect();
            for entry in order {
                let name = entry.as_text().ok_or_else(|| {
                    DispatchError::invalid_payload( "changeColumnOrder", "order entries must be column names" )
                })?;
                if !known.contains( &name ) {
                    return Err( DispatchError::invalid_payload(
                        "changeColumnOrder",
                        format!( "column '{}' is not present in the column set", name ),
                    ));
                }
            }
            state.set( "columnOrder", Value::List( order.to_vec() ));
            Ok(())
        })
}

fn apply_order<T: Clone>( items: &[T], order: &[Value], name_of: impl Fn( &T ) -> &str ) -> Vec<T> {
    if order.is_empty() {
        return items.to_vec();
    }
    let names: Vec<&str> = order.iter().filter_map( Value::as_text ).collect();
    let mut ordered: Vec<T> = names.iter()
        .filter_map(| name | items.iter().find(| item | name_of( *item ) == *name ))
        .cloned()
        .collect();
    ordered.extend( items.iter().filter(| item | !names.contains( &name_of( *item ))).cloned() );
    ordered
}

/// User-driven column resizing.
///
/// - Slice `columnWidths`: a record of column name to width.
/// - Slice `draftColumnWidths`: in-progress resize previews, always
///   uncontrolled, cleared when the resize lands.
/// - Decorates `tableColumns` with the draft width where present, else the
///   committed width.
/// - Action `changeTableColumnWidths` with payload `{ changes }`, a record
///   of column name to width *delta*: each delta is added to the column's
///   current width (clamped at zero) and any draft for it is dropped. A
///   delta for a column with no seeded width is an invalid payload.
/// - Action `changeDraftTableColumnWidths` with payload `{ changes }`
///   (same delta shape, staged into the draft record only) or
///   `{ cancel: true }` to drop all drafts.
pub fn table_column_resizing( widths: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "TableColumnResizing" )
        .after( "Table" )
        .with_slice( "columnWidths", widths )
        .with_slice( "draftColumnWidths", StateSource::uncontrolled( Value::Record( BTreeMap::new() )))
        .with_getter( "tableColumns", | scope: &GetterScope | {
            let upstream = scope.value( "tableColumns" )?;
            let widths = scope.slice( "columnWidths" ).unwrap_or_default();
            let drafts = scope.slice( "draftColumnWidths" ).unwrap_or_default();
            match upstream.as_table_columns() {
                Some( columns ) => Ok( Value::TableColumns(
                    columns.iter()
                        .map(| column | {
                            let width = drafts.get( column.name() )
                                .or_else(|| widths.get( column.name() ))
                                .and_then( Value::as_float );
                            match width {
                                Some( width ) => column.clone().with_width( width ),
                                None => column.clone(),
                            }
                        })
                        .collect(),
                )),
                None => Ok( upstream ),
            }
        })
        .with_action( "changeTableColumnWidths", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let changes = resize_changes( payload, "changeTableColumnWidths" )?;
            let mut widths = state.get( "columnWidths" )
                .and_then( Value::as_record )
                .cloned()
                .unwrap_or_default();
            let mut drafts = state.get( "draftColumnWidths" )
                .and_then( Value::as_record )
                .cloned()
                .unwrap_or_default();
            let mut drafts_touched = false;
            for ( column, delta ) in &changes {
                let base = seeded_width( &widths, column, "changeTableColumnWidths" )?;
                widths.insert( column.clone(), Value::Float(( base + delta ).max( 0.0 )));
                if drafts.remove( column ).is_some() {
                    drafts_touched = true;
                }
            }
            state.set( "columnWidths", Value::Record( widths ));
            if drafts_touched {
                state.set( "draftColumnWidths", Value::Record( drafts ));
            }
            Ok(())
        })
        .with_action( "changeDraftTableColumnWidths", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            if payload::flag( payload, "cancel" ) {
                state.set( "draftColumnWidths", Value::Record( BTreeMap::new() ));
                return Ok(());
            }
            let changes = resize_changes( payload, "changeDraftTableColumnWidths" )?;
            let widths = state.get( "columnWidths" )
                .and_then( Value::as_record )
                .cloned()
                .unwrap_or_default();
            let mut drafts = state.get( "draftColumnWidths" )
                .and_then( Value::as_record )
                .cloned()
                .unwrap_or_default();
            for ( column, delta ) in &changes {
                let base = seeded_width( &widths, column, "changeDraftTableColumnWidths" )?;
                drafts.insert( column.clone(), Value::Float(( base + delta ).max( 0.0 )));
            }
            state.set( "draftColumnWidths", Value::Record( drafts ));
            Ok(())
        })
}

fn resize_changes( payload: &Value, action: &str ) -> Result<Vec<( String, f64 )>, DispatchError> {
    payload::field( payload, action, "changes" )?
        .as_record()
        .ok_or_else(|| DispatchError::invalid_payload( action, "field 'changes' must be a record" ))?
        .iter()
        .map(|( column, delta )| match delta.as_float() {
            Some( delta ) => Ok(( column.clone(), delta )),
            None => Err( DispatchError::invalid_payload(
                action,
                format!( "change for column '{}' must be a number", column ),
            )),
        })
        .try_collect()
}

fn seeded_width( widths: &BTreeMap<String, Value>, column: &str, action: &str ) -> Result<f64, DispatchError> {
    widths.get( column )
        .and_then( Value::as_float )
        .ok_or_else(|| DispatchError::invalid_payload(
            action,
            format!( "no width defined for column '{}'", column ),
        ))
}

/// Drag-and-drop context shared by drag sources in other plugins.
///
/// - Slice/getter `dragging`: null when idle, `{ columnName }` while a
///   column drag is in flight.
/// - Action `changeDragging` with payload `{ columnName }` to start or
///   update a drag, or `{ cancel: true }` to end it.
pub fn drag_drop_context() -> PluginDescriptor {
    PluginDescriptor::new( "DragDropContext" )
        .with_slice( "dragging", StateSource::uncontrolled( Value::Null ))
        .with_getter( "dragging", | scope: &GetterScope | {
            Ok( scope.slice( "dragging" ).unwrap_or_default() )
        })
        .with_action( "changeDragging", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            if payload::flag( payload, "cancel" ) {
                state.set( "dragging", Value::Null );
                return Ok(());
            }
            let column = payload::text_field( payload, "changeDragging", "columnName" )?;
            state.set( "dragging", Value::record([( "columnName", Value::Text( column ))]));
            Ok(())
        })
}

/// Virtual scrolling over the table's rows.
///
/// - Slice/getter `viewport`: `{ top, height }` in pixels, updated by the
///   theme's scroll handling through `changeViewport`.
/// - Decorates `tableRows` to the window of rows intersecting the viewport
///   (one extra row of overscan), assuming `row_height` pixels per row.
/// - Action `changeViewport` with payload `{ top, height }`; negative
///   values are rejected.
pub fn virtual_table( row_height: f64 ) -> PluginDescriptor {
    PluginDescriptor::new( "VirtualTable" )
        .after( "Table" )
        .with_slice( "viewport", StateSource::uncontrolled( Value::record([
            ( "top", Value::Float( 0.0 )),
            ( "height", Value::Float( 600.0 )),
        ])))
        .with_getter( "viewport", | scope: &GetterScope | {
            Ok( scope.slice( "viewport" ).unwrap_or_default() )
        })
        .with_getter( "tableRows", move | scope: &GetterScope | {
            let upstream = scope.value( "tableRows" )?;
            let rows = match upstream.as_rows() {
                Some( rows ) => rows,
                None => return Ok( upstream ),
            };
            let viewport = scope.slice( "viewport" ).unwrap_or_default();
            let top = viewport.get( "top" ).and_then( Value::as_float ).unwrap_or( 0.0 ).max( 0.0 );
            let height = viewport.get( "height" ).and_then( Value::as_float ).unwrap_or( 0.0 ).max( 0.0 );
            #[allow( clippy::cast_possible_truncation, clippy::cast_sign_loss )]
            let start = ( top / row_height ).floor() as usize ;
            #[allow( clippy::cast_possible_truncation, clippy::cast_sign_loss )]
            let visible = ( height / row_height ).ceil() as usize + 1;
            Ok( Value::Rows( rows.iter().skip( start ).take( visible ).cloned().collect() ))
        })
        .with_action( "changeViewport", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let top = payload::float_field( payload, "changeViewport", "top" )?;
            let height = payload::float_field( payload, "changeViewport", "height" )?;
            if top < 0.0 || height < 0.0 {
                return Err( DispatchError::invalid_payload( "changeViewport", "top and height must not be negative" ));
            }
            state.set( "viewport", Value::record([
                ( "top", Value::Float( top )),
                ( "height", Value::Float( height )),
            ]));
            Ok(())
        })
}
