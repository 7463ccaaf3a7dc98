//! Plugin descriptor types.
//!
//! A plugin is a self-contained unit of grid behavior. Its descriptor declares
//! everything the host needs to compose it with others: a name, ordering
//! constraints against other plugins (by name, not instance), the state slices
//! it owns, and its three kinds of contributions - getters (computed values),
//! actions (state transitions), and template slot content.
//!
//! Descriptors are plain data plus closures; they are never mutated after
//! construction. Removing a descriptor from the mounted list and adding it
//! back is equivalent to a fresh instance.

use std::rc::Rc ;

use crate::graph::{ GetterScope, GetterError, ActionState, DispatchError };
use crate::state::StateSource ;
use crate::template::SlotPosition ;
use crate::value::Value ;



/// A getter contribution: a pure function of upstream getters and state.
pub type GetterFn = Rc<dyn Fn( &GetterScope ) -> Result<Value, GetterError>>;

/// An action contribution: one link of the fold chain for a named action.
///
/// Receives the state as folded so far, the dispatched payload, and a getter
/// accessor over the pre-dispatch cycle.
pub type ActionFn = Rc<dyn Fn( &mut ActionState, &Value, &GetterScope ) -> Result<(), DispatchError>>;

/// A template contribution: produces slot content from the current getters.
pub type TemplateFn = Rc<dyn Fn( &GetterScope ) -> Result<Value, GetterError>>;

/// An ordering constraint on another plugin, referenced by name.
#[derive( Debug, Clone )]
pub struct Dependency {
    /// Name of the plugin this one must be evaluated after
    name: String,
    /// Whether the dependency may be absent from the mounted set
    optional: bool,
}

impl Dependency {

    /// Name of the plugin this one must be evaluated after.
    #[inline] pub fn name( &self ) -> &str { &self.name }

    /// Returns `true` if the dependency may be absent from the mounted set.
    ///
    /// A required dependency on an absent plugin fails resolution with
    /// [`MissingDependency`]( crate::ResolveError::MissingDependency ); an
    /// optional one is simply skipped.
    #[inline] pub fn is_optional( &self ) -> bool { self.optional }

}

/// A state slice owned by a plugin.
#[derive( Clone )]
pub struct SliceDecl {
    name: String,
    source: StateSource,
}

impl SliceDecl {
    /// Name of the slice.
    #[inline] pub fn name( &self ) -> &str { &self.name }
    /// Where the slice's value comes from (controlled or uncontrolled).
    #[inline] pub fn source( &self ) -> &StateSource { &self.source }
}

/// A template slot contribution.
#[derive( Clone )]
pub struct TemplateDecl {
    slot: String,
    position: SlotPosition,
    template: TemplateFn,
}

impl TemplateDecl {
    /// Name of the slot this content goes into.
    #[inline] pub fn slot( &self ) -> &str { &self.slot }
    /// Placement hint relative to other contributors.
    #[inline] pub fn position( &self ) -> &SlotPosition { &self.position }
    /// The content-producing function.
    #[inline] pub fn template( &self ) -> &TemplateFn { &self.template }
}

/// Declares a plugin's identity, ordering constraints, and contributions.
///
/// Built with the builder methods and handed to
/// [`Grid::mount`]( crate::Grid::mount ). The declaration order of getter and
/// action contributions is preserved; their evaluation order across plugins is
/// decided by dependency resolution.
///
/// # Example
///
/// ```
/// use grid_link::{ PluginDescriptor, GetterScope, Value };
///
/// let uppercase_titles = PluginDescriptor::new( "UppercaseTitles" )
/// 	.after( "Table" )
/// 	.with_getter( "tableColumns", | scope: &GetterScope | {
/// 		// Decorates the upstream `tableColumns` value untouched here;
/// 		// a real plugin would transform it.
/// 		scope.value( "tableColumns" )
/// 	});
/// assert_eq!( uppercase_titles.name(), "UppercaseTitles" );
/// ```
pub struct PluginDescriptor {
    name: String,
    after: Vec<Dependency>,
    before: Vec<String>,
    slices: Vec<SliceDecl>,
    getters: Vec<( String, GetterFn )>,
    actions: Vec<( String, ActionFn )>,
    templates: Vec<TemplateDecl>,
}

impl PluginDescriptor {

    /// Creates an empty descriptor with the given plugin name.
    pub fn new( name: impl Into<String> ) -> Self {
        Self {
            name: name.into(),
            after: Vec::with_capacity( 0 ),
            before: Vec::with_capacity( 0 ),
            slices: Vec::with_capacity( 0 ),
            getters: Vec::with_capacity( 0 ),
            actions: Vec::with_capacity( 0 ),
            templates: Vec::with_capacity( 0 ),
        }
    }

    /// Requires this plugin to be evaluated after the named plugin.
    ///
    /// Resolution fails with
    /// [`MissingDependency`]( crate::ResolveError::MissingDependency ) if no
    /// plugin of that name is mounted.
    pub fn after( mut self, name: impl Into<String> ) -> Self {
        self.after.push( Dependency { name: name.into(), optional: false });
        self
    }

    /// Like [`after`]( Self::after ), but skipped when the named plugin is absent.
    pub fn after_optional( mut self, name: impl Into<String> ) -> Self {
        self.after.push( Dependency { name: name.into(), optional: true });
        self
    }

    /// Requires this plugin to be evaluated before the named plugin.
    ///
    /// The constraint is vacuous (and skipped) when the named plugin is absent.
    pub fn before( mut self, name: impl Into<String> ) -> Self {
        self.before.push( name.into() );
        self
    }

    /// Declares a state slice owned by this plugin.
    pub fn with_slice( mut self, name: impl Into<String>, source: StateSource ) -> Self {
        self.slices.push( SliceDecl { name: name.into(), source });
        self
    }

    /// Contributes a getter under `name`.
    ///
    /// When an earlier-resolved plugin already contributes `name`, this
    /// contribution decorates it: requesting `name` through the supplied
    /// [`GetterScope`] yields the upstream value.
    pub fn with_getter(
        mut self,
        name: impl Into<String>,
        getter: impl Fn( &GetterScope ) -> Result<Value, GetterError> + 'static,
    ) -> Self {
        self.getters.push(( name.into(), Rc::new( getter )));
        self
    }

    /// Contributes a handler for the action `name`.
    ///
    /// All handlers for one action name run as a left fold in resolution
    /// order; each observes the state produced by the previous one.
    pub fn with_action(
        mut self,
        name: impl Into<String>,
        action: impl Fn( &mut ActionState, &Value, &GetterScope ) -> Result<(), DispatchError> + 'static,
    ) -> Self {
        self.actions.push(( name.into(), Rc::new( action )));
        self
    }

    /// Contributes content to the template slot `slot`.
    pub fn with_template(
        mut self,
        slot: impl Into<String>,
        position: SlotPosition,
        template: impl Fn( &GetterScope ) -> Result<Value, GetterError> + 'static,
    ) -> Self {
        self.templates.push( TemplateDecl {
            slot: slot.into(),
            position,
            template: Rc::new( template ),
        });
        self
    }

    /// Plugin name, referenced by other plugins' ordering constraints.
    #[inline] pub fn name( &self ) -> &str { &self.name }

    /// Plugins this one must be evaluated after.
    #[inline] pub fn dependencies( &self ) -> &[Dependency] { &self.after }

    /// Plugins this one must be evaluated before.
    #[inline] pub fn precedes( &self ) -> &[String] { &self.before }

    /// State slices owned by this plugin.
    #[inline] pub fn slices( &self ) -> &[SliceDecl] { &self.slices }

    /// Getter contributions, in declaration order.
    #[inline] pub fn getters( &self ) -> &[( String, GetterFn )] { &self.getters }

    /// Action contributions, in declaration order.
    #[inline] pub fn actions( &self ) -> &[( String, ActionFn )] { &self.actions }

    /// Template slot contributions, in declaration order.
    #[inline] pub fn templates( &self ) -> &[TemplateDecl] { &self.templates }

}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "PluginDescriptor" )
            .field( "name", &self.name )
            .field( "after", &self.after )
            .field( "before", &self.before )
            .field( "slices", &self.slices.iter().map( SliceDecl::name ).collect::<Vec<_>>() )
            .field( "getters", &self.getters.iter().map(|( name, _ )| name ).collect::<Vec<_>>() )
            .field( "actions", &self.actions.iter().map(|( name, _ )| name ).collect::<Vec<_>>() )
            .field( "templates", &self.templates.iter().map( TemplateDecl::slot ).collect::<Vec<_>>() )
            .finish()
    }
}
