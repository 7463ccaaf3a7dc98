//! Dependency resolution.
//!
//! Turns the registered plugin list into the **resolution order**: a
//! topological order over the declared `after`/`before` constraints. Plugins
//! with no ordering constraint between them keep their registration order
//! (stable tie-break), so resolution is deterministic and matches authoring
//! intent for independent plugins.
//!
//! Resolution is a pure function of the descriptor list; the host re-runs it
//! only when the plugin set changes, and halts (keeping the previous set) on
//! error rather than rendering with undefined getters.

use std::cmp::Reverse ;
use std::collections::{ BinaryHeap, HashMap };

use itertools::Itertools ;
use nonempty_collections::NEVec ;
use thiserror::Error ;

use crate::descriptor::PluginDescriptor ;



/// Errors detected while resolving the plugin dependency graph.
///
/// Both are reported eagerly at mount time: continuing with an unresolvable
/// plugin set would surface as corrupted grid state instead of a diagnostic.
#[derive( Error, Debug )]
pub enum ResolveError {
    /// The ordering constraints contain a cycle; no valid order exists.
    #[error( "Cyclic dependency between plugins: {}", join_names( involved ))]
    CyclicDependency {
        /// Names of the plugins left unordered by the cycle, in registration order.
        involved: NEVec<String>,
    },
    /// A plugin requires another by name, and no plugin of that name is mounted.
    #[error( "Missing dependency: '{plugin}' requires '{dependency}'" )]
    MissingDependency {
        /// The plugin declaring the dependency.
        plugin: String,
        /// The name it depends on.
        dependency: String,
    },
}

fn join_names( names: &NEVec<String> ) -> String {
    names.clone().into_iter().join( ", " )
}

/// Computes the resolution order for `descriptors`.
///
/// Returns indices into `descriptors` such that every plugin appears after
/// all plugins named in its required and present-optional `after`
/// constraints, and before all present plugins named in its `before`
/// constraints. Ties preserve registration order.
///
/// Multiple plugins may share a name; a constraint on that name orders the
/// constrained plugin relative to every instance.
///
/// # Errors
/// - [`ResolveError::MissingDependency`] if a required `after` names an
///   absent plugin. Optional `after` and all `before` constraints are
///   skipped when the other party is absent.
/// - [`ResolveError::CyclicDependency`] if no topological order exists. No
///   partial order is ever returned.
pub fn resolve( descriptors: &[PluginDescriptor] ) -> Result<Vec<usize>, ResolveError> {

    let by_name: HashMap<&str, Vec<usize>> = descriptors.iter()
        .enumerate()
        .map(|( index, descriptor )| ( descriptor.name(), index ))
        .into_group_map();

    let mut successors: Vec<Vec<usize>> = vec![ Vec::with_capacity( 0 ); descriptors.len() ];
    let mut indegree: Vec<usize> = vec![ 0; descriptors.len() ];

    for ( index, descriptor ) in descriptors.iter().enumerate() {
        for dependency in descriptor.dependencies() {
            match by_name.get( dependency.name() ) {
                Some( providers ) => for &provider in providers {
                    if provider != index {
                        successors[ provider ].push( index );
                        indegree[ index ] += 1;
                    }
                },
                None if dependency.is_optional() => {}
                None => return Err( ResolveError::MissingDependency {
                    plugin: descriptor.name().to_string(),
                    dependency: dependency.name().to_string(),
                }),
            }
        }
        for name in descriptor.precedes() {
            if let Some( followers ) = by_name.get( name.as_str() ) {
                for &follower in followers {
                    if follower != index {
                        successors[ index ].push( follower );
                        indegree[ follower ] += 1;
                    }
                }
            }
        }
    }

    // Kahn's algorithm. The ready set is a min-heap on registration index,
    // which yields the stable tie-break.
    let mut ready: BinaryHeap<Reverse<usize>> = indegree.iter()
        .enumerate()
        .filter(|( _, &degree )| degree == 0 )
        .map(|( index, _ )| Reverse( index ))
        .collect();

    let mut order = Vec::with_capacity( descriptors.len() );
    let mut placed = vec![ false; descriptors.len() ];

    while let Some( Reverse( index )) = ready.pop() {
        order.push( index );
        placed[ index ] = true;
        for &follower in &successors[ index ] {
            indegree[ follower ] -= 1;
            if indegree[ follower ] == 0 {
                ready.push( Reverse( follower ));
            }
        }
    }

    let mut stuck = descriptors.iter()
        .enumerate()
        .filter(|( index, _ )| !placed[ *index ])
        .map(|( _, descriptor )| descriptor.name().to_string())
        .unique();

    match stuck.next() {
        None => Ok( order ),
        Some( first ) => {
            let mut involved = NEVec::new( first );
            for name in stuck {
                involved.push( name );
            }
            Err( ResolveError::CyclicDependency { involved })
        }
    }

}
