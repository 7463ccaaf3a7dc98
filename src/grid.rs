//! The grid host.
//!
//! [`Grid`] owns the mount contract: the row and column collections, the
//! active plugin list, the state container, and the per-cycle getter cache.
//! The embedding application mounts an ordered plugin list, reads getters
//! and slots from its view layer, and dispatches actions on interaction.
//! Re-invoking [`mount`]( Grid::mount ) with a changed list (or changed
//! controlled props) is the re-render path.

use std::cell::{ Cell, RefCell };
use std::collections::HashMap ;

use itertools::Itertools ;

use crate::descriptor::PluginDescriptor ;
use crate::graph::{ ComputationGraph, DispatchError, EvalEnv, GetterError, GetterScope };
use crate::registry::PluginRegistry ;
use crate::resolver::{ resolve, ResolveError };
use crate::state::StateContainer ;
use crate::template::{ SlotContent, TemplateSlots };
use crate::value::{ Column, Row, Value };



/// A mounted grid: plugins, state, and the computation graph over them.
///
/// The host is single-threaded and cooperative: getter evaluation and action
/// dispatch are synchronous, cycles are strictly sequential, and nothing in
/// the engine blocks. Getter reads are re-entrant; dispatch is not (see
/// [`DispatchError::ReentrantDispatch`]).
pub struct Grid {
    rows: Vec<Row>,
    columns: Vec<Column>,
    registry: PluginRegistry,
    state: RefCell<StateContainer>,
    graph: ComputationGraph,
    slots: TemplateSlots,
    cache: RefCell<HashMap<( String, usize ), Value>>,
    dispatching: Cell<bool>,
}

impl Grid {

    /// Creates a grid over the given row and column collections, with no
    /// plugins mounted. Only the identity getters (`rows`, `columns`)
    /// resolve until [`mount`]( Self::mount ) is called.
    pub fn new(
        rows: impl IntoIterator<Item = Row>,
        columns: impl IntoIterator<Item = Column>,
    ) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            columns: columns.into_iter().collect(),
            registry: PluginRegistry::new(),
            state: RefCell::new( StateContainer::new() ),
            graph: ComputationGraph::default(),
            slots: TemplateSlots::default(),
            cache: RefCell::new( HashMap::new() ),
            dispatching: Cell::new( false ),
        }
    }

    /// Mounts an ordered plugin list, replacing the current one.
    ///
    /// The incoming set is resolved eagerly; on error nothing changes - the
    /// previously mounted set stays in force, so a failed remount halts with
    /// a diagnostic instead of rendering with undefined getters.
    ///
    /// State slices are reconciled: slices owned by plugins that survive the
    /// remount (same name, same control mode) keep their state; everything
    /// else is seeded fresh. See
    /// [`StateContainer`]( crate::StateContainer ) for the exact rules.
    ///
    /// # Errors
    /// [`ResolveError::CyclicDependency`] or
    /// [`ResolveError::MissingDependency`] from dependency resolution.
    pub fn mount( &mut self, plugins: impl IntoIterator<Item = PluginDescriptor> ) -> Result<(), ResolveError> {

        let descriptors: Vec<PluginDescriptor> = plugins.into_iter().collect();
        let order = resolve( &descriptors )?;
        log::debug!(
            "mounted: {}",
            order.iter().map(| &index | descriptors[ index ].name() ).join( " -> " ),
        );

        self.registry.register( descriptors );
        let active = self.registry.active_plugins();
        self.state.borrow_mut().sync( active );
        self.graph = ComputationGraph::build( active, &order );
        self.slots = TemplateSlots::build( active, &order );
        self.cache.borrow_mut().clear();
        Ok(())

    }

    /// Resolves a getter by name through the full decorator chain.
    ///
    /// Values are memoized for the current cycle: repeated reads between
    /// commits are cheap and observe identical values.
    ///
    /// # Errors
    /// [`GetterError::UnknownGetter`] when no mounted plugin contributes
    /// `name` and it isn't an identity getter.
    pub fn get_value( &self, name: &str ) -> Result<Value, GetterError> {
        self.graph.value( self.env(), name, usize::MAX )
    }

    /// Dispatches an action through every contributing plugin, in resolution
    /// order, and commits the result atomically.
    ///
    /// # Errors
    /// See [`DispatchError`]; on any error nothing is committed.
    pub fn dispatch( &self, action: &str, payload: Value ) -> Result<(), DispatchError> {
        self.graph.dispatch( self.env(), &self.dispatching, action, &payload )
    }

    /// Renders every contribution to a template slot, ordered per the
    /// contributors' position hints. Unknown slots render as empty.
    ///
    /// # Errors
    /// Propagates getter failures from the contributions' templates.
    pub fn render_slot( &self, slot: &str ) -> Result<Vec<SlotContent>, GetterError> {
        let env = self.env();
        let scope = GetterScope { env, bound: usize::MAX };
        self.slots.render( slot, &scope )
    }

    /// The current value of a state slice, or `None` if no mounted plugin
    /// declares it.
    pub fn read_slice( &self, name: &str ) -> Option<Value> {
        self.state.borrow().read_slice( name ).cloned()
    }

    /// Replaces the row collection and invalidates the getter cache.
    pub fn set_rows( &mut self, rows: impl IntoIterator<Item = Row> ) {
        self.rows = rows.into_iter().collect();
        self.cache.borrow_mut().clear();
    }

    /// Replaces the column collection and invalidates the getter cache.
    pub fn set_columns( &mut self, columns: impl IntoIterator<Item = Column> ) {
        self.columns = columns.into_iter().collect();
        self.cache.borrow_mut().clear();
    }

    /// The mounted row collection, as supplied by the application.
    #[inline] pub fn rows( &self ) -> &[Row] { &self.rows }

    /// The mounted column collection, as supplied by the application.
    #[inline] pub fn columns( &self ) -> &[Column] { &self.columns }

    /// The plugin registry (read access).
    #[inline] pub fn registry( &self ) -> &PluginRegistry { &self.registry }

    fn env( &self ) -> EvalEnv<'_> {
        EvalEnv {
            graph: &self.graph,
            rows: &self.rows,
            columns: &self.columns,
            state: &self.state,
            cache: &self.cache,
        }
    }

}
