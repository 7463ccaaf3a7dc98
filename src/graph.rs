//! The computation graph: getter evaluation and action dispatch.
//!
//! Getters form **decorator chains**: contributions to one name are stacked in
//! resolution order, and a later contribution wraps the earlier ones. The
//! contributor at resolution position `p` observes every getter - including
//! its own name - as the chain truncated to positions before `p`; the host
//! observes the full chain. Because the truncation bound strictly decreases
//! along any evaluation path, evaluation always terminates without runtime
//! cycle checks. Values are memoized per `( name, chain length )` for the
//! duration of a render cycle.
//!
//! Actions are a **left fold**: every contribution to the dispatched name runs
//! in resolution order over a scratch copy of the state snapshot, and the
//! result is committed atomically - a handler error aborts the whole dispatch
//! with nothing committed.

use std::cell::{ Cell, RefCell };
use std::collections::{ BTreeMap, BTreeSet, HashMap };

use thiserror::Error ;

use crate::descriptor::{ ActionFn, GetterFn, PluginDescriptor };
use crate::state::StateContainer ;
use crate::value::{ Column, Row, Value };



/// Errors from getter evaluation.
#[derive( Error, Debug )]
pub enum GetterError {
	/// No mounted plugin contributes the requested getter, and it isn't one
	/// of the identity getters (`rows`, `columns`).
	#[error( "Unknown getter: {0}" )] UnknownGetter( String ),
}

/// Errors from action dispatch.
///
/// A dispatch error means nothing was committed: the state container is
/// exactly as it was before the dispatch. Errors propagate to the caller and
/// are never retried by the engine.
#[derive( Error, Debug )]
pub enum DispatchError {
	/// `dispatch` was re-entered while a dispatch was in flight. Contributors
	/// and change handlers may read getters re-entrantly, but dispatching
	/// from within a dispatch is a programming error.
	#[error( "Reentrant dispatch" )] ReentrantDispatch,
	/// No mounted plugin handles the dispatched action name.
	#[error( "Unknown action: {0}" )] UnknownAction( String ),
	/// An action handler rejected the payload.
	#[error( "Invalid payload for '{action}': {reason}" )] InvalidPayload {
		/// The dispatched action name.
		action: String,
		/// What the handler found wrong.
		reason: String,
	},
	/// A getter failed while a handler was reading through its accessor.
	#[error( "Getter error: {0}" )] Getter( #[from] GetterError ),
}

impl DispatchError {
	/// Shorthand for building an [`InvalidPayload`]( Self::InvalidPayload ) error.
	pub fn invalid_payload( action: impl Into<String>, reason: impl Into<String> ) -> Self {
		Self::InvalidPayload { action: action.into(), reason: reason.into() }
	}
}

struct GetterLink {
	position: usize,
	getter: GetterFn,
}

struct ActionLink {
	action: ActionFn,
}

/// Contribution chains indexed by name, in resolution order.
///
/// Rebuilt on every mount; evaluation state (the memo cache, the state
/// container) lives in the host and is borrowed per call through
/// [`EvalEnv`].
#[derive( Default )]
pub(crate) struct ComputationGraph {
	getter_chains: HashMap<String, Vec<GetterLink>>,
	action_chains: HashMap<String, Vec<ActionLink>>,
}

/// Everything one evaluation needs, borrowed from the host.
#[derive( Clone, Copy )]
pub(crate) struct EvalEnv<'a> {
	pub graph: &'a ComputationGraph,
	pub rows: &'a [Row],
	pub columns: &'a [Column],
	pub state: &'a RefCell<StateContainer>,
	pub cache: &'a RefCell<HashMap<( String, usize ), Value>>,
}

impl ComputationGraph {

	/// Indexes the descriptors' contributions by name, in resolution order.
	pub(crate) fn build( descriptors: &[PluginDescriptor], order: &[usize] ) -> Self {
		let mut getter_chains: HashMap<String, Vec<GetterLink>> = HashMap::new();
		let mut action_chains: HashMap<String, Vec<ActionLink>> = HashMap::new();
		for ( position, &index ) in order.iter().enumerate() {
			let descriptor = &descriptors[ index ];
			for ( name, getter ) in descriptor.getters() {
				getter_chains.entry( name.clone() )
					.or_default()
					.push( GetterLink { position, getter: getter.clone() });
			}
			for ( name, action ) in descriptor.actions() {
				action_chains.entry( name.clone() )
					.or_default()
					.push( ActionLink { action: action.clone() });
			}
		}
		Self { getter_chains, action_chains }
	}

	/// Evaluates the getter chain for `name`, truncated to positions below
	/// `bound`. The host requests the full chain with `bound = usize::MAX`.
	///
	/// # Errors
	/// [`GetterError::UnknownGetter`] when the truncated chain is empty and
	/// `name` is not an identity getter.
	pub(crate) fn value( &self, env: EvalEnv<'_>, name: &str, bound: usize ) -> Result<Value, GetterError> {

		let chain = self.getter_chains.get( name );
		let prefix = chain.map_or( 0, | links | {
			links.iter().take_while(| link | link.position < bound ).count()
		});

		let key = ( name.to_string(), prefix );
		if let Some( value ) = env.cache.borrow().get( &key ) {
			return Ok( value.clone() );
		}

		// The cache borrow above is released before evaluating: contributors
		// recurse into this function for their upstream values.
		let value = match chain {
			Some( links ) if prefix > 0 => {
				let link = &links[ prefix - 1 ];
				let scope = GetterScope { env, bound: link.position };
				( link.getter )( &scope )?
			}
			_ => Self::identity_value( env, name )?,
		};

		env.cache.borrow_mut().insert( key, value.clone() );
		Ok( value )

	}

	/// The base of every chain: the mounted row and column collections.
	fn identity_value( env: EvalEnv<'_>, name: &str ) -> Result<Value, GetterError> {
		match name {
			"rows" => Ok( Value::Rows( env.rows.to_vec() )),
			"columns" => Ok( Value::Columns( env.columns.to_vec() )),
			_ => Err( GetterError::UnknownGetter( name.to_string() )),
		}
	}

	/// Dispatches `action` with `payload`: folds every contribution in
	/// resolution order over a scratch copy of the state snapshot, then
	/// commits the changed slices atomically and invalidates the getter
	/// cache. Change handlers are notified after the commit, outside any
	/// borrow of the state container.
	///
	/// # Errors
	/// - [`DispatchError::ReentrantDispatch`] when called while another
	///   dispatch is in flight (including from a change handler).
	/// - [`DispatchError::UnknownAction`] when no contribution handles `action`.
	/// - Any error a handler returns; the fold aborts and nothing is committed.
	pub(crate) fn dispatch(
		&self,
		env: EvalEnv<'_>,
		in_flight: &Cell<bool>,
		action: &str,
		payload: &Value,
	) -> Result<(), DispatchError> {

		if in_flight.get() {
			return Err( DispatchError::ReentrantDispatch );
		}
		let links = match self.action_chains.get( action ) {
			Some( links ) => links,
			None => return Err( DispatchError::UnknownAction( action.to_string() )),
		};

		in_flight.set( true );
		let _guard = DispatchGuard( in_flight );

		let mut state = ActionState {
			values: env.state.borrow().snapshot(),
			changed: BTreeSet::new(),
		};
		let scope = GetterScope { env, bound: usize::MAX };
		for link in links {
			( link.action )( &mut state, payload, &scope )?;
		}

		let ActionState { values, changed } = state ;
		let mut notifications = Vec::with_capacity( changed.len() );
		{
			let mut container = env.state.borrow_mut();
			for name in &changed {
				if let Some( value ) = values.get( name ) {
					if let Some( notification ) = container.apply( name, value.clone() ) {
						notifications.push( notification );
					}
				}
			}
		}
		env.cache.borrow_mut().clear();
		log::debug!( "committed action '{}' ({} slice(s) changed)", action, changed.len() );

		// Still inside the guard: a handler that dispatches synchronously
		// gets ReentrantDispatch, preserving strictly sequential cycles.
		for ( handler, value ) in notifications {
			handler( &value );
		}

		Ok(())

	}

}

struct DispatchGuard<'a>( &'a Cell<bool> );

impl Drop for DispatchGuard<'_> {
	fn drop( &mut self ) { self.0.set( false ); }
}

/// Read access to getters and state, bound to one point of the chain.
///
/// Getter contributors receive a scope bound to their own resolution
/// position: requesting any getter - including the one being computed -
/// yields the value as of the plugins resolved before them. Action handlers
/// and templates receive an unbounded scope over the pre-dispatch cycle.
pub struct GetterScope<'a> {
	pub(crate) env: EvalEnv<'a>,
	pub(crate) bound: usize,
}

impl GetterScope<'_> {

	/// Resolves a getter visible from this scope.
	///
	/// # Errors
	/// [`GetterError::UnknownGetter`] when nothing upstream contributes `name`.
	pub fn value( &self, name: &str ) -> Result<Value, GetterError> {
		self.env.graph.value( self.env, name, self.bound )
	}

	/// The current value of a state slice, or `None` if undeclared.
	pub fn slice( &self, name: &str ) -> Option<Value> {
		self.env.state.borrow().read_slice( name ).cloned()
	}

}

/// The state map threaded through an action fold.
///
/// Starts as a snapshot of every slice's pre-dispatch value. Handlers read
/// with [`get`]( Self::get ) and stage writes with [`set`]( Self::set );
/// staged writes become visible to later handlers in the fold immediately,
/// and to everyone else only when the whole fold commits.
pub struct ActionState {
	values: BTreeMap<String, Value>,
	changed: BTreeSet<String>,
}

impl ActionState {

	/// The folded value of a slice (staged writes included).
	#[inline] pub fn get( &self, slice: &str ) -> Option<&Value> {
		self.values.get( slice )
	}

	/// Stages a write to a slice.
	pub fn set( &mut self, slice: impl Into<String>, value: Value ) {
		let slice = slice.into();
		self.values.insert( slice.clone(), value );
		self.changed.insert( slice );
	}

}
