//! State plugins.
//!
//! Each plugin here owns one dimension of grid state as a slice (controlled
//! or uncontrolled per the [`StateSource`] it is constructed with), exposes
//! the slice through a getter of the same name, and handles the actions that
//! transition it. None of them touch rows or columns - the transforms that
//! consume this state live in [`local`]( crate::plugins::local ).

use std::collections::BTreeMap ;
use std::rc::Rc ;

use crate::descriptor::PluginDescriptor ;
use crate::graph::{ ActionState, DispatchError, GetterScope };
use crate::state::StateSource ;
use crate::value::Value ;

use super::payload ;



/// Sorting criteria state.
///
/// - Slice/getter `sorting`: a list of `{ columnName, direction }` records,
///   `direction` being `"asc"` or `"desc"`.
/// - Action `changeSorting` with payload `{ columnName, direction?, keepOther?,
///   cancel? }`: omitting `direction` toggles the column's current direction
///   (`asc` on first sort); `keepOther` preserves other columns' criteria;
///   `cancel` removes the column's criterion instead.
pub fn sorting_state( sorting: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "SortingState" )
        .with_slice( "sorting", sorting )
        .with_getter( "sorting", | scope: &GetterScope | {
            Ok( scope.slice( "sorting" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_action( "changeSorting", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let column = payload::text_field( payload, "changeSorting", "columnName" )?;
            let keep_other = payload::flag( payload, "keepOther" );
            let cancel = payload::flag( payload, "cancel" );

            let current: Vec<Value> = state.get( "sorting" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            let existing = current.iter().position(| entry | {
                entry.get( "columnName" ).and_then( Value::as_text ) == Some( column.as_str() )
            });

            let direction = match payload.get( "direction" ).and_then( Value::as_text ) {
                Some( direction @ ( "asc" | "desc" )) => direction.to_string(),
                Some( other ) => return Err( DispatchError::invalid_payload(
                    "changeSorting",
                    format!( "unknown direction '{}'", other ),
                )),
                // No explicit direction: toggle the current one.
                None => match existing.and_then(| index | current[ index ].get( "direction" ).and_then( Value::as_text )) {
                    Some( "asc" ) => "desc".to_string(),
                    _ => "asc".to_string(),
                },
            };

            let entry = Value::record([
                ( "columnName", Value::Text( column.clone() )),
                ( "direction", Value::Text( direction )),
            ]);
            let next = match ( cancel, keep_other ) {
                ( true, true ) => current.iter()
                    .filter(| candidate | candidate.get( "columnName" ).and_then( Value::as_text ) != Some( column.as_str() ))
                    .cloned()
                    .collect(),
                ( true, false ) => Vec::with_capacity( 0 ),
                ( false, true ) => {
                    let mut next = current ;
                    match existing {
                        Some( index ) => next[ index ] = entry,
                        None => next.push( entry ),
                    }
                    next
                }
                ( false, false ) => vec![ entry ],
            };
            state.set( "sorting", Value::List( next ));
            Ok(())
        })
}

/// Column filter state.
///
/// - Slice/getter `filters`: a list of `{ columnName, value }` records.
/// - Action `changeColumnFilter` with payload `{ columnName, value? }`:
///   replaces the column's filter, or removes it when `value` is omitted or
///   null.
pub fn filtering_state( filters: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "FilteringState" )
        .with_slice( "filters", filters )
        .with_getter( "filters", | scope: &GetterScope | {
            Ok( scope.slice( "filters" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_action( "changeColumnFilter", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let column = payload::text_field( payload, "changeColumnFilter", "columnName" )?;
            let value = payload.get( "value" ).cloned().unwrap_or( Value::Null );

            let mut next: Vec<Value> = state.get( "filters" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            let existing = next.iter().position(| entry | {
                entry.get( "columnName" ).and_then( Value::as_text ) == Some( column.as_str() )
            });

            match ( existing, value.is_null() ) {
                ( Some( index ), true ) => { next.remove( index ); }
                ( None, true ) => {}
                ( slot, false ) => {
                    let entry = Value::record([
                        ( "columnName", Value::Text( column )),
                        ( "value", value ),
                    ]);
                    match slot {
                        Some( index ) => next[ index ] = entry,
                        None => next.push( entry ),
                    }
                }
            }
            state.set( "filters", Value::List( next ));
            Ok(())
        })
}

/// Paging state.
///
/// - Slices/getters `currentPage` and `pageSize` (integers; a page size of 0
///   disables paging).
/// - Action `changeCurrentPage` with payload `{ page }`.
/// - Action `changePageSize` with payload `{ pageSize }`.
pub fn paging_state( current_page: StateSource, page_size: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "PagingState" )
        .with_slice( "currentPage", current_page )
        .with_slice( "pageSize", page_size )
        .with_getter( "currentPage", | scope: &GetterScope | {
            Ok( scope.slice( "currentPage" ).unwrap_or( Value::Int( 0 )))
        })
        .with_getter( "pageSize", | scope: &GetterScope | {
            Ok( scope.slice( "pageSize" ).unwrap_or( Value::Int( 0 )))
        })
        .with_action( "changeCurrentPage", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let page = payload::int_field( payload, "changeCurrentPage", "page" )?;
            if page < 0 {
                return Err( DispatchError::invalid_payload( "changeCurrentPage", "page must not be negative" ));
            }
            state.set( "currentPage", Value::Int( page ));
            Ok(())
        })
        .with_action( "changePageSize", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let size = payload::int_field( payload, "changePageSize", "pageSize" )?;
            if size < 0 {
                return Err( DispatchError::invalid_payload( "changePageSize", "pageSize must not be negative" ));
            }
            state.set( "pageSize", Value::Int( size ));
            Ok(())
        })
}

/// Grouping state.
///
/// - Slice/getter `grouping`: a list of `{ columnName }` records, outermost
///   group first.
/// - Slice/getter `expandedGroups`: a list of compound group keys (text).
/// - Action `changeGrouping` with payload `{ columnName }`: toggles grouping
///   by that column.
/// - Action `toggleGroupExpansion` with payload `{ groupKey }`.
pub fn grouping_state( grouping: StateSource, expanded_groups: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "GroupingState" )
        .with_slice( "grouping", grouping )
        .with_slice( "expandedGroups", expanded_groups )
        .with_getter( "grouping", | scope: &GetterScope | {
            Ok( scope.slice( "grouping" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_getter( "expandedGroups", | scope: &GetterScope | {
            Ok( scope.slice( "expandedGroups" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_action( "changeGrouping", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let column = payload::text_field( payload, "changeGrouping", "columnName" )?;
            let mut next: Vec<Value> = state.get( "grouping" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            match next.iter().position(| entry | {
                entry.get( "columnName" ).and_then( Value::as_text ) == Some( column.as_str() )
            }) {
                Some( index ) => { next.remove( index ); }
                None => next.push( Value::record([( "columnName", Value::Text( column ))])),
            }
            state.set( "grouping", Value::List( next ));
            Ok(())
        })
        .with_action( "toggleGroupExpansion", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let key = payload::text_field( payload, "toggleGroupExpansion", "groupKey" )?;
            let mut next: Vec<Value> = state.get( "expandedGroups" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            match next.iter().position(| entry | entry.as_text() == Some( key.as_str() )) {
                Some( index ) => { next.remove( index ); }
                None => next.push( Value::Text( key )),
            }
            state.set( "expandedGroups", Value::List( next ));
            Ok(())
        })
}

/// Row selection state.
///
/// - Slice/getter `selection`: a list of selected row identifiers (integers).
/// - Action `changeSelection` with payload `{ selection }` (wholesale
///   replacement) or `{ rowId, selected? }` (toggle one row, or force its
///   state when `selected` is given).
pub fn selection_state( selection: StateSource ) -> PluginDescriptor {
    PluginDescriptor::new( "SelectionState" )
        .with_slice( "selection", selection )
        .with_getter( "selection", | scope: &GetterScope | {
            Ok( scope.slice( "selection" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_action( "changeSelection", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            if let Some( replacement ) = payload.get( "selection" ) {
                match replacement.as_list() {
                    Some( values ) => {
                        state.set( "selection", Value::List( values.to_vec() ));
                        return Ok(());
                    }
                    None => return Err( DispatchError::invalid_payload(
                        "changeSelection",
                        "field 'selection' must be a list",
                    )),
                }
            }
            let row_id = payload::int_field( payload, "changeSelection", "rowId" )?;
            let mut next: Vec<Value> = state.get( "selection" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            let position = next.iter().position(| entry | entry.as_int() == Some( row_id ));
            let select = payload.get( "selected" )
                .and_then( Value::as_bool )
                .unwrap_or( position.is_none() );
            match ( position, select ) {
                ( Some( _ ), true ) | ( None, false ) => {}
                ( Some( index ), false ) => { next.remove( index ); }
                ( None, true ) => next.push( Value::Int( row_id )),
            }
            state.set( "selection", Value::List( next ));
            Ok(())
        })
}

/// Row editing state.
///
/// - Slices/getters `addedRows` (list of row records), `changedRows` (record
///   keyed by row id), `deletedRows` (list of row ids).
/// - Action `addRow` with payload `{ row }`.
/// - Action `changeRow` with payload `{ rowId, change }`: shallow-merges
///   `change` into the row's pending change record.
/// - Action `deleteRow` with payload `{ rowId }`.
/// - Action `commitChanges` (empty payload): delivers
///   `{ added, changed, deleted }` to `on_commit` and clears all three
///   slices. Persisting the change set is the embedding application's job.
pub fn editing_state(
    added_rows: StateSource,
    changed_rows: StateSource,
    deleted_rows: StateSource,
    on_commit: impl Fn( &Value ) + 'static,
) -> PluginDescriptor {
    let on_commit: Rc<dyn Fn( &Value )> = Rc::new( on_commit );
    PluginDescriptor::new( "EditingState" )
        .with_slice( "addedRows", added_rows )
        .with_slice( "changedRows", changed_rows )
        .with_slice( "deletedRows", deleted_rows )
        .with_getter( "addedRows", | scope: &GetterScope | {
            Ok( scope.slice( "addedRows" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_getter( "changedRows", | scope: &GetterScope | {
            Ok( scope.slice( "changedRows" ).unwrap_or( Value::Record( BTreeMap::new() )))
        })
        .with_getter( "deletedRows", | scope: &GetterScope | {
            Ok( scope.slice( "deletedRows" ).unwrap_or( Value::List( Vec::with_capacity( 0 ))))
        })
        .with_action( "addRow", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let row = payload::field( payload, "addRow", "row" )?;
            if row.as_record().is_none() {
                return Err( DispatchError::invalid_payload( "addRow", "field 'row' must be a record" ));
            }
            let mut next: Vec<Value> = state.get( "addedRows" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            next.push( row.clone() );
            state.set( "addedRows", Value::List( next ));
            Ok(())
        })
        .with_action( "changeRow", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let row_id = payload::int_field( payload, "changeRow", "rowId" )?;
            let change = payload::field( payload, "changeRow", "change" )?;
            let change = change.as_record().ok_or_else(|| {
                DispatchError::invalid_payload( "changeRow", "field 'change' must be a record" )
            })?;
            let mut next: BTreeMap<String, Value> = state.get( "changedRows" )
                .and_then( Value::as_record )
                .cloned()
                .unwrap_or_default();
            let mut merged = next.get( &row_id.to_string() )
                .and_then( Value::as_record )
                .cloned()
                .unwrap_or_default();
            merged.extend( change.clone() );
            next.insert( row_id.to_string(), Value::Record( merged ));
            state.set( "changedRows", Value::Record( next ));
            Ok(())
        })
        .with_action( "deleteRow", | state: &mut ActionState, payload: &Value, _: &GetterScope | {
            let row_id = payload::int_field( payload, "deleteRow", "rowId" )?;
            let mut next: Vec<Value> = state.get( "deletedRows" )
                .and_then( Value::as_list )
                .map( <[Value]>::to_vec )
                .unwrap_or_default();
            if !next.iter().any(| entry | entry.as_int() == Some( row_id )) {
                next.push( Value::Int( row_id ));
            }
            state.set( "deletedRows", Value::List( next ));
            Ok(())
        })
        .with_action( "commitChanges", move | state: &mut ActionState, _: &Value, _: &GetterScope | {
            let change_set = Value::record([
                ( "added", state.get( "addedRows" ).cloned().unwrap_or( Value::List( Vec::with_capacity( 0 )))),
                ( "changed", state.get( "changedRows" ).cloned().unwrap_or( Value::Record( BTreeMap::new() ))),
                ( "deleted", state.get( "deletedRows" ).cloned().unwrap_or( Value::List( Vec::with_capacity( 0 )))),
            ]);
            on_commit( &change_set );
            state.set( "addedRows", Value::List( Vec::with_capacity( 0 )));
            state.set( "changedRows", Value::Record( BTreeMap::new() ));
            state.set( "deletedRows", Value::List( Vec::with_capacity( 0 )));
            Ok(())
        })
}
