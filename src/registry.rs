//! The active plugin list.
//!
//! The registry holds the declarative, ordered list of mounted plugins - the
//! order here is authoring order, not evaluation order. Re-registering
//! replaces the whole list and bumps a generation counter, which is how the
//! cached resolution order downstream knows to invalidate.

use crate::descriptor::PluginDescriptor ;



/// Holds the ordered list of active plugins.
#[derive( Debug, Default )]
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
    generation: u64,
}

impl PluginRegistry {

    /// Creates an empty registry (generation 0, no plugins).
    pub fn new() -> Self {
        Self { plugins: Vec::with_capacity( 0 ), generation: 0 }
    }

    /// Replaces the active plugin list.
    ///
    /// An empty list is valid - the grid then exposes identity getters only.
    /// Bumps the generation counter so cached resolution results are
    /// recomputed on the next pass.
    pub fn register( &mut self, plugins: impl IntoIterator<Item = PluginDescriptor> ) {
        self.plugins = plugins.into_iter().collect();
        self.generation += 1;
        log::debug!( "registered {} plugin(s), generation {}", self.plugins.len(), self.generation );
    }

    /// The active plugins, in authoring order.
    #[inline] pub fn active_plugins( &self ) -> &[PluginDescriptor] { &self.plugins }

    /// Bumped on every [`register`]( Self::register ) call.
    #[inline] pub fn generation( &self ) -> u64 { self.generation }

    /// Number of active plugins.
    #[inline] pub fn len( &self ) -> usize { self.plugins.len() }

    /// Returns `true` if no plugins are active.
    #[inline] pub fn is_empty( &self ) -> bool { self.plugins.is_empty() }

}
