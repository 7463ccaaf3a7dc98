//! The state container.
//!
//! Every plugin owns zero or more named **state slices**. A slice is either
//! *controlled* - the embedding application supplies the current value and a
//! change callback, and the container never stores writes - or
//! *uncontrolled* - the container stores the value, seeded once from the
//! declared initial. The mode is an explicit sum type ([`StateSource`]), fixed
//! for the lifetime of a plugin instance.
//!
//! The container is the only mutable shared resource in the engine. It is
//! written exclusively by the computation graph's commit step; plugins and
//! views read it through [`read_slice`]( StateContainer::read_slice ) or
//! through getters.

use std::collections::BTreeMap ;
use std::rc::Rc ;

use crate::descriptor::PluginDescriptor ;
use crate::value::Value ;



/// Callback invoked with a slice's new value when a committed write touches it.
pub type ChangeHandler = Rc<dyn Fn( &Value )>;

/// Where a slice's value comes from.
///
/// Carried by a plugin's slice declaration; see
/// [`PluginDescriptor::with_slice`]( crate::PluginDescriptor::with_slice ).
#[derive( Clone )]
pub enum StateSource {
    /// The embedding application owns the value. Writes only invoke
    /// `on_change`; the value changes when the application re-mounts with an
    /// updated `value`.
    Controlled {
        /// The current application-supplied value
        value: Value,
        /// Invoked with the would-be new value on every committed write
        on_change: ChangeHandler,
    },
    /// The container owns the value, seeded once from `initial` when the
    /// slice first appears. Later mounts never reseed it.
    Uncontrolled {
        /// Creation-time seed, not a live binding
        initial: Value,
        /// Optionally notified with the new value on every committed write
        on_change: Option<ChangeHandler>,
    },
}

impl StateSource {

    /// A controlled slice: the application supplies `value` and owns the truth.
    pub fn controlled( value: impl Into<Value>, on_change: impl Fn( &Value ) + 'static ) -> Self {
        Self::Controlled { value: value.into(), on_change: Rc::new( on_change )}
    }

    /// An uncontrolled slice seeded with `initial`.
    pub fn uncontrolled( initial: impl Into<Value> ) -> Self {
        Self::Uncontrolled { initial: initial.into(), on_change: None }
    }

    /// An uncontrolled slice that also reports committed writes to `on_change`.
    pub fn uncontrolled_with( initial: impl Into<Value>, on_change: impl Fn( &Value ) + 'static ) -> Self {
        Self::Uncontrolled { initial: initial.into(), on_change: Some( Rc::new( on_change ))}
    }

    fn is_controlled( &self ) -> bool { matches!( self, Self::Controlled { .. })}

}

impl std::fmt::Debug for StateSource {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        match self {
            Self::Controlled { value, .. } => f.debug_struct( "Controlled" )
                .field( "value", value )
                .field( "on_change", &"<callback>" )
                .finish(),
            Self::Uncontrolled { initial, on_change } => f.debug_struct( "Uncontrolled" )
                .field( "initial", initial )
                .field( "on_change", &on_change.as_ref().map(| _ | "<callback>" ))
                .finish(),
        }
    }
}

struct Slice {
    owner: String,
    state: StateSource,
    /// Stored value for uncontrolled slices; unused when controlled.
    stored: Value,
}

impl Slice {

    fn seed( owner: &str, source: &StateSource ) -> Self {
        let stored = match source {
            StateSource::Controlled { .. } => Value::Null,
            StateSource::Uncontrolled { initial, .. } => initial.clone(),
        };
        Self { owner: owner.to_string(), state: source.clone(), stored }
    }

    fn current( &self ) -> &Value {
        match &self.state {
            StateSource::Controlled { value, .. } => value,
            StateSource::Uncontrolled { .. } => &self.stored,
        }
    }

}

/// Holds every mounted plugin's state slices.
#[derive( Default )]
pub struct StateContainer {
    slices: BTreeMap<String, Slice>,
}

impl StateContainer {

    pub(crate) fn new() -> Self {
        Self { slices: BTreeMap::new() }
    }

    /// The current value of the named slice.
    ///
    /// Controlled slices resolve to the latest application-supplied value;
    /// uncontrolled slices to the internally stored one. `None` when no
    /// mounted plugin declares the slice.
    pub fn read_slice( &self, name: &str ) -> Option<&Value> {
        self.slices.get( name ).map( Slice::current )
    }

    /// Returns whether the named slice is controlled, or `None` if undeclared.
    pub fn is_controlled( &self, name: &str ) -> Option<bool> {
        self.slices.get( name ).map(| slice | slice.state.is_controlled() )
    }

    /// Every slice's current value, keyed by slice name.
    pub(crate) fn snapshot( &self ) -> BTreeMap<String, Value> {
        self.slices.iter()
            .map(|( name, slice )| ( name.clone(), slice.current().clone() ))
            .collect()
    }

    /// Applies one committed write.
    ///
    /// Uncontrolled slices store the value immediately; controlled slices are
    /// left untouched (the write is a report, the application remains the
    /// source of truth). Returns the change handler to notify, if any - the
    /// caller invokes it after releasing its borrow of the container.
    pub(crate) fn apply( &mut self, name: &str, value: Value ) -> Option<( ChangeHandler, Value )> {
        match self.slices.get_mut( name ) {
            None => {
                log::warn!( "dropping write to undeclared state slice '{}'", name );
                None
            }
            Some( slice ) => match &slice.state {
                StateSource::Controlled { on_change, .. } => Some(( on_change.clone(), value )),
                StateSource::Uncontrolled { on_change, .. } => {
                    let handler = on_change.clone();
                    slice.stored = value.clone();
                    handler.map(| handler | ( handler, value ))
                }
            },
        }
    }

    /// Reconciles the slices against a freshly mounted descriptor list.
    ///
    /// A slice whose owner plugin is still mounted under the same name and
    /// mode survives: uncontrolled storage is kept (the declared initial is a
    /// creation-time seed only), controlled value and callback are refreshed
    /// from the new descriptor. Anything else - new slice, removed owner, or
    /// a control-mode switch - is seeded fresh; mode switches are logged since
    /// they are almost always an embedding bug.
    pub(crate) fn sync( &mut self, descriptors: &[PluginDescriptor] ) {
        let mut next: BTreeMap<String, Slice> = BTreeMap::new();
        for descriptor in descriptors {
            for decl in descriptor.slices() {
                if next.contains_key( decl.name() ) {
                    log::warn!(
                        "state slice '{}' declared by more than one plugin; keeping the first owner",
                        decl.name(),
                    );
                    continue;
                }
                let slice = match self.slices.remove( decl.name() ) {
                    Some( existing ) if existing.owner == descriptor.name() =>
                        Self::merge( existing, descriptor.name(), decl.name(), decl.source() ),
                    _ => Slice::seed( descriptor.name(), decl.source() ),
                };
                next.insert( decl.name().to_string(), slice );
            }
        }
        self.slices = next;
    }

    fn merge( existing: Slice, owner: &str, name: &str, source: &StateSource ) -> Slice {
        match ( &existing.state, source ) {
            // Same mode: uncontrolled keeps its stored value, controlled
            // mirrors the fresh prop. Both pick up the new callback.
            ( StateSource::Uncontrolled { .. }, StateSource::Uncontrolled { .. }) => Slice {
                owner: existing.owner,
                state: source.clone(),
                stored: existing.stored,
            },
            ( StateSource::Controlled { .. }, StateSource::Controlled { .. }) =>
                Slice::seed( owner, source ),
            _ => {
                log::warn!(
                    "state slice '{}' switched control mode; treating it as a fresh instance",
                    name,
                );
                Slice::seed( owner, source )
            }
        }
    }

}

impl std::fmt::Debug for StateContainer {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        let mut map = f.debug_map();
        for ( name, slice ) in &self.slices {
            map.entry( &name, &slice.current() );
        }
        map.finish()
    }
}
