//! In-process data transforms.
//!
//! Each plugin here decorates the `rows` getter: filtering keeps matching
//! rows, sorting reorders them, grouping folds them into group records, and
//! paging windows the result. Dependency constraints pin the conventional
//! transform order (filter, then sort, then group, then page) regardless of
//! how the embedding application lists the plugins.
//!
//! Every transform passes unrecognized row shapes through untouched, so a
//! transform that doesn't understand its upstream (say, paging over already
//! grouped rows) still composes instead of corrupting the chain.

use pipe_trait::Pipe ;

use crate::descriptor::PluginDescriptor ;
use crate::graph::GetterScope ;
use crate::value::{ Row, Value };



/// Filters `rows` by the `filters` getter of
/// [`filtering_state`]( crate::plugins::filtering_state ).
///
/// A row passes when, for every filter, the text rendering of its cell in the
/// filtered column contains the filter value (case-insensitive).
pub fn local_filtering() -> PluginDescriptor {
    PluginDescriptor::new( "LocalFiltering" )
        .after( "FilteringState" )
        .with_getter( "rows", | scope: &GetterScope | {
            let upstream = scope.value( "rows" )?;
            let filters = scope.value( "filters" )?;
            let filters = filters.as_list().unwrap_or( &[] );
            if filters.is_empty() {
                return Ok( upstream );
            }
            let rows = match upstream.as_rows() {
                Some( rows ) => rows,
                None => return Ok( upstream ),
            };
            let filtered: Vec<Row> = rows.iter()
                .filter(| row | filters.iter().all(| filter | {
                    let column = filter.get( "columnName" ).and_then( Value::as_text ).unwrap_or( "" );
                    let needle = filter.get( "value" )
                        .map(| value | value.to_string().to_lowercase() )
                        .unwrap_or_default();
                    row.cell( column ).to_string().to_lowercase().contains( &needle )
                }))
                .cloned()
                .collect();
            Ok( Value::Rows( filtered ))
        })
}

/// Sorts `rows` by the `sorting` getter of
/// [`sorting_state`]( crate::plugins::sorting_state ).
///
/// Criteria apply in order; the sort is stable, so rows equal under every
/// criterion keep their upstream order.
pub fn local_sorting() -> PluginDescriptor {
    PluginDescriptor::new( "LocalSorting" )
        .after( "SortingState" )
        .after_optional( "LocalFiltering" )
        .with_getter( "rows", | scope: &GetterScope | {
            let upstream = scope.value( "rows" )?;
            let sorting = scope.value( "sorting" )?;
            let sorting = sorting.as_list().unwrap_or( &[] );
            if sorting.is_empty() {
                return Ok( upstream );
            }
            let mut rows = match upstream.as_rows() {
                Some( rows ) => rows.to_vec(),
                None => return Ok( upstream ),
            };
            rows.sort_by(| left, right | {
                for criterion in sorting {
                    let column = criterion.get( "columnName" ).and_then( Value::as_text ).unwrap_or( "" );
                    let descending = criterion.get( "direction" ).and_then( Value::as_text ) == Some( "desc" );
                    let ordering = left.cell( column ).compare( right.cell( column ));
                    let ordering = match descending {
                        true => ordering.reverse(),
                        false => ordering,
                    };
                    if ordering != std::cmp::Ordering::Equal {
                        return ordering ;
                    }
                }
                std::cmp::Ordering::Equal
            });
            Ok( Value::Rows( rows ))
        })
}

/// Folds `rows` into group records per the `grouping` and `expandedGroups`
/// getters of [`grouping_state`]( crate::plugins::grouping_state ).
///
/// With grouping active, `rows` becomes a list of records
/// `{ groupedBy, key, value, expanded }` plus either `rows` (innermost
/// level) or `groups` (nested grouping) - present only while the group is
/// expanded. Group keys compound across levels with `|`.
pub fn local_grouping() -> PluginDescriptor {
    PluginDescriptor::new( "LocalGrouping" )
        .after( "GroupingState" )
        .after_optional( "LocalFiltering" )
        .after_optional( "LocalSorting" )
        .with_getter( "rows", | scope: &GetterScope | {
            let upstream = scope.value( "rows" )?;
            let grouping = scope.value( "grouping" )?;
            let columns: Vec<String> = grouping.as_list()
                .unwrap_or( &[] )
                .iter()
                .filter_map(| entry | entry.get( "columnName" ).and_then( Value::as_text ))
                .map( str::to_string )
                .collect();
            if columns.is_empty() {
                return Ok( upstream );
            }
            let rows = match upstream.as_rows() {
                Some( rows ) => rows,
                None => return Ok( upstream ),
            };
            let expanded = scope.value( "expandedGroups" )?;
            let expanded: Vec<String> = expanded.as_list()
                .unwrap_or( &[] )
                .iter()
                .filter_map( Value::as_text )
                .map( str::to_string )
                .collect();
            Ok( Value::List( group_rows( rows, &columns, &expanded, "" )))
        })
}

fn group_rows( rows: &[Row], grouping: &[String], expanded: &[String], parent_key: &str ) -> Vec<Value> {

    let column = &grouping[ 0 ];
    let nested = &grouping[ 1.. ];

    // Buckets keep first-appearance order so a sorted upstream stays sorted.
    let mut buckets: Vec<( String, Value, Vec<Row> )> = Vec::new();
    for row in rows {
        let value = row.cell( column ).clone();
        let text = value.to_string();
        match buckets.iter_mut().find(|( key, _, _ )| *key == text ) {
            Some(( _, _, members )) => members.push( row.clone() ),
            None => buckets.push(( text, value, vec![ row.clone() ])),
        }
    }

    buckets.into_iter()
        .map(|( text, value, members )| {
            let key = match parent_key.is_empty() {
                true => text,
                false => format!( "{}|{}", parent_key, text ),
            };
            let is_expanded = expanded.iter().any(| candidate | *candidate == key );
            let mut group = vec![
                ( "groupedBy", Value::Text( column.clone() )),
                ( "key", Value::Text( key.clone() )),
                ( "value", value ),
                ( "expanded", Value::Bool( is_expanded )),
            ];
            if is_expanded {
                match nested.is_empty() {
                    true => group.push(( "rows", Value::Rows( members ))),
                    false => group.push(( "groups", Value::List( group_rows( &members, nested, expanded, &key )))),
                }
            }
            Value::record( group )
        })
        .collect()

}

/// Windows `rows` to the current page per the `currentPage` and `pageSize`
/// getters of [`paging_state`]( crate::plugins::paging_state ), and exposes
/// `totalPages` for pager components.
///
/// A page size of 0 disables paging. A current page beyond the last page is
/// clamped at read time, so shrinking row sets never show an empty window.
pub fn local_paging() -> PluginDescriptor {
    PluginDescriptor::new( "LocalPaging" )
        .after( "PagingState" )
        .after_optional( "LocalFiltering" )
        .after_optional( "LocalSorting" )
        .after_optional( "LocalGrouping" )
        .with_getter( "totalPages", | scope: &GetterScope | {
            let size = scope.value( "pageSize" )?.as_int().unwrap_or( 0 );
            let count = item_count( &scope.value( "rows" )? );
            Ok( Value::Int( page_count( count, size )))
        })
        .with_getter( "rows", | scope: &GetterScope | {
            let upstream = scope.value( "rows" )?;
            let size = scope.value( "pageSize" )?.as_int().unwrap_or( 0 );
            if size <= 0 {
                return Ok( upstream );
            }
            let requested = scope.value( "currentPage" )?.as_int().unwrap_or( 0 ).max( 0 );
            let count = item_count( &upstream );
            let page = requested.min( page_count( count, size ) - 1 ).max( 0 );

            #[allow( clippy::cast_sign_loss )]
            let ( start, length ) = (( page * size ) as usize, size as usize );
            match upstream {
                Value::Rows( rows ) => rows.into_iter()
                    .skip( start )
                    .take( length )
                    .collect::<Vec<_>>()
                    .pipe( Value::Rows )
                    .pipe( Ok ),
                Value::List( items ) => items.into_iter()
                    .skip( start )
                    .take( length )
                    .collect::<Vec<_>>()
                    .pipe( Value::List )
                    .pipe( Ok ),
                other => Ok( other ),
            }
        })
}

fn item_count( rows: &Value ) -> i64 {
    let count = match rows {
        Value::Rows( rows ) => rows.len(),
        Value::List( items ) => items.len(),
        _ => 0,
    };
    i64::try_from( count ).unwrap_or( i64::MAX )
}

fn page_count( items: i64, page_size: i64 ) -> i64 {
    match page_size <= 0 {
        true => 1,
        false => (( items + page_size - 1 ) / page_size ).max( 1 ),
    }
}
