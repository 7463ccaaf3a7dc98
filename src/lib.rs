//! A plugin composition engine for building fully modular data grids.
//!
//! Grid behavior - sorting, filtering, grouping, paging, selection, editing,
//! column reordering and resizing, virtual scrolling - is contributed by
//! small, single-purpose **plugins** composed over a shared state and
//! computation core. `grid_link` resolves the plugins' declared ordering
//! dependencies into a deterministic evaluation order and coordinates three
//! kinds of contributions:
//!
//! # Core Concepts
//!
//! - [`PluginDescriptor`]: A plugin's declaration - its name, ordering
//! 	constraints on other plugins (by name), the state slices it owns, and
//! 	its getter/action/template contributions.
//!
//! - **Getter**: A named, pure, memoized-per-cycle computed value. Multiple
//! 	plugins may contribute the same getter name; later contributions
//! 	*decorate* earlier ones, reading the upstream value through their
//! 	[`GetterScope`]. The `rows` and `columns` getters resolve to the
//! 	mounted collections when nothing decorates them.
//!
//! - **Action**: A named state transition with a payload. Every contribution
//! 	to the dispatched name runs as a left fold in resolution order, and the
//! 	folded result commits atomically - a failing handler aborts the whole
//! 	dispatch with nothing committed.
//!
//! - **Slice**: One named piece of grid state, either *uncontrolled* (owned
//! 	by the engine, seeded from a default) or *controlled* (mirrored from
//! 	the embedding application, which is notified of writes and remains the
//! 	source of truth). See [`StateSource`].
//!
//! - **Template slot**: A named extension point plugins contribute content
//! 	to, ordered by resolution order and optional position hints
//! 	([`SlotPosition`]).
//!
//! - [`Grid`]: The host. Owns rows, columns, the mounted plugin list, and
//! 	state; exposes [`get_value`]( Grid::get_value ),
//! 	[`dispatch`]( Grid::dispatch ), and
//! 	[`render_slot`]( Grid::render_slot ) to view layers.
//!
//! # Example
//!
//! ```
//! use grid_link::{ Grid, Row, Column, Value };
//! use grid_link::plugins::{ table, table_header_row };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![
//! 	Row::new([( "name", Value::from( "Sandra" )), ( "city", Value::from( "Austin" ))]),
//! 	Row::new([( "name", Value::from( "Dustin" )), ( "city", Value::from( "Paris" ))]),
//! ];
//! let columns = vec![
//! 	Column::new( "name" ).with_title( "Name" ),
//! 	Column::new( "city" ).with_title( "City" ),
//! ];
//!
//! let mut grid = Grid::new( rows, columns );
//! grid.mount([ table(), table_header_row() ])?;
//!
//! let table_columns = grid.get_value( "tableColumns" )?;
//! assert_eq!( table_columns.as_table_columns().map( <[_]>::len ), Some( 2 ));
//! # Ok(())
//! # }
//! ```
//!
//! # Decoration
//!
//! Transform plugins decorate getters instead of replacing them. Mounting
//! the sorting pair makes `rows` resolve through the sort:
//!
//! ```
//! use grid_link::{ Grid, Row, Column, Value, StateSource };
//! use grid_link::plugins::{ sorting_state, local_sorting };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![
//! 	Row::new([( "name", Value::from( "Sandra" ))]),
//! 	Row::new([( "name", Value::from( "Dustin" ))]),
//! ];
//! let mut grid = Grid::new( rows, vec![ Column::new( "name" )]);
//!
//! grid.mount([
//! 	sorting_state( StateSource::uncontrolled( Value::List( vec![] ))),
//! 	local_sorting(),
//! ])?;
//!
//! grid.dispatch( "changeSorting", Value::record([( "columnName", Value::from( "name" ))]))?;
//!
//! let rows = grid.get_value( "rows" )?;
//! let first = &rows.as_rows().unwrap()[ 0 ];
//! assert_eq!( first.cell( "name" ), &Value::from( "Dustin" ));
//! # Ok(())
//! # }
//! ```
//!
//! # Controlled and Uncontrolled State
//!
//! Every slice is constructed from a [`StateSource`]. Uncontrolled slices
//! live inside the engine, seeded once from their declared initial value.
//! Controlled slices mirror a value the application supplies; committed
//! writes only invoke the application's change callback, and the value
//! changes when the application re-mounts with the updated prop - exactly
//! the unidirectional flow of a controlled component.
//!
//! # Errors
//!
//! Resolution problems ([`ResolveError`]) are reported eagerly when the
//! plugin set changes and leave the previous set mounted - a grid never
//! renders with undefined getters. Dispatch problems ([`DispatchError`])
//! abort the offending dispatch with nothing committed and propagate to the
//! caller; the engine never retries and never swallows an error to keep
//! going, because a half-applied transition on a data grid is worse than a
//! visible failure.

mod descriptor ;
mod graph ;
mod grid ;
mod registry ;
mod resolver ;
mod state ;
mod template ;
mod value ;

pub mod plugins ;

pub use descriptor::{ ActionFn, Dependency, GetterFn, PluginDescriptor, SliceDecl, TemplateDecl, TemplateFn };
pub use graph::{ ActionState, DispatchError, GetterError, GetterScope };
pub use grid::Grid ;
pub use registry::PluginRegistry ;
pub use resolver::{ resolve, ResolveError };
pub use state::{ ChangeHandler, StateContainer, StateSource };
pub use template::{ SlotContent, SlotPosition };
pub use value::{ Column, Row, TableColumn, Value };
