//! Template slots.
//!
//! A slot is a named extension point. Plugins contribute content to slots;
//! host components query a slot and receive every contribution, ordered by
//! resolution order unless a contribution carries an explicit position hint.
//! Hints are resolved against the currently mounted contributors at render
//! time, so remounting with a different plugin list reorders slot content
//! accordingly.

use std::collections::HashMap ;

use crate::descriptor::{ PluginDescriptor, TemplateFn };
use crate::graph::{ GetterError, GetterScope };
use crate::value::Value ;



/// Placement hint for one slot contribution.
#[derive( Debug, Clone, PartialEq, Eq, Default )]
pub enum SlotPosition {
    /// Resolution-order placement.
    #[default] Default,
    /// Before every non-`First` contribution.
    First,
    /// After every non-`Last` contribution.
    Last,
    /// Immediately after the named plugin's contributions. Falls back to
    /// resolution-order placement when that plugin contributes nothing to
    /// the slot.
    After( String ),
}

/// One rendered slot contribution.
#[derive( Debug, Clone, PartialEq )]
pub struct SlotContent {
    plugin: String,
    content: Value,
}

impl SlotContent {
    /// Name of the contributing plugin.
    #[inline] pub fn plugin( &self ) -> &str { &self.plugin }
    /// The rendered content.
    #[inline] pub fn content( &self ) -> &Value { &self.content }
}

struct SlotEntry {
    plugin: String,
    position: SlotPosition,
    template: TemplateFn,
}

/// All slot contributions of the mounted plugin set, in resolution order.
#[derive( Default )]
pub(crate) struct TemplateSlots {
    slots: HashMap<String, Vec<SlotEntry>>,
}

impl TemplateSlots {

    /// Collects slot contributions from `descriptors` in resolution order.
    pub(crate) fn build( descriptors: &[PluginDescriptor], order: &[usize] ) -> Self {
        let mut slots: HashMap<String, Vec<SlotEntry>> = HashMap::new();
        for &index in order {
            let descriptor = &descriptors[ index ];
            for decl in descriptor.templates() {
                slots.entry( decl.slot().to_string() )
                    .or_default()
                    .push( SlotEntry {
                        plugin: descriptor.name().to_string(),
                        position: decl.position().clone(),
                        template: decl.template().clone(),
                    });
            }
        }
        Self { slots }
    }

    /// Renders every contribution of `slot`, ordered per position hints.
    ///
    /// An unknown slot renders as empty - slots exist by being contributed to.
    ///
    /// # Errors
    /// Propagates the first getter failure from a contribution's template.
    pub(crate) fn render( &self, slot: &str, scope: &GetterScope<'_> ) -> Result<Vec<SlotContent>, GetterError> {
        let entries = match self.slots.get( slot ) {
            Some( entries ) => entries,
            None => return Ok( Vec::with_capacity( 0 )),
        };
        Self::arrange( entries ).into_iter()
            .map(| entry | Ok( SlotContent {
                plugin: entry.plugin.clone(),
                content: ( entry.template )( scope )?,
            }))
            .collect()
    }

    /// Applies position hints to the resolution-ordered entries.
    fn arrange( entries: &[SlotEntry] ) -> Vec<&SlotEntry> {

        let mut ordered: Vec<&SlotEntry> = Vec::with_capacity( entries.len() );
        ordered.extend( entries.iter().filter(| entry | entry.position == SlotPosition::First ));
        ordered.extend( entries.iter().filter(| entry | entry.position == SlotPosition::Default ));
        ordered.extend( entries.iter().filter(| entry | entry.position == SlotPosition::Last ));

        for entry in entries {
            let SlotPosition::After( target ) = &entry.position else { continue };
            let insert_at = match ordered.iter().rposition(| placed | &placed.plugin == target ) {
                Some( position ) => position + 1,
                // Absent target: land at the end of the unhinted region.
                None => {
                    let trailing_lasts = ordered.iter().rev()
                        .take_while(| placed | placed.position == SlotPosition::Last )
                        .count();
                    ordered.len() - trailing_lasts
                }
            };
            ordered.insert( insert_at, entry );
        }

        ordered

    }

}
