//! Render sink that turns draw calls into outbound protocol messages.

use crate::protocol::OutboundMessage;
use goatan_core::{PlaceRequest, RenderItem, RenderSink};
use std::collections::HashMap;

/// Queues one outbound message per draw call.
///
/// Handles are sequential and never reused, so a stale handle from an
/// earlier frame can't hit a visual from the current one.
#[derive(Debug, Default)]
pub struct JsonLinesSink {
    next_handle: u64,
    outbox: Vec<OutboundMessage>,
    activations: HashMap<u64, PlaceRequest>,
}

impl JsonLinesSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement request wired to `handle`, if any
    pub fn activate(&self, handle: u64) -> Option<&PlaceRequest> {
        self.activations.get(&handle)
    }

    /// Take every queued message
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn activatable_count(&self) -> usize {
        self.activations.len()
    }
}

impl RenderSink for JsonLinesSink {
    type Handle = u64;

    fn place(&mut self, item: &RenderItem) -> u64 {
        self.next_handle += 1;
        self.outbox.push(OutboundMessage::Place {
            handle: self.next_handle,
            entity: item.entity.clone(),
            kind: item.kind.clone(),
            x: item.position.x,
            y: item.position.y,
            tint: item.tint,
            overlay: item.overlay.clone(),
        });
        self.next_handle
    }

    fn remove(&mut self, handle: u64) {
        self.activations.remove(&handle);
        self.outbox.push(OutboundMessage::Remove { handle });
    }

    fn on_activate(&mut self, handle: &u64, request: PlaceRequest) {
        self.activations.insert(*handle, request);
        self.outbox.push(OutboundMessage::Activatable { handle: *handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goatan_core::{EntityRef, OverlayState, Point, Tint, VisualKind};
    use pretty_assertions::assert_eq;

    fn corner(id: &str, position: Point, tint: Option<Tint>) -> RenderItem {
        RenderItem {
            entity: EntityRef::Intersection(id.into()),
            kind: VisualKind::Intersection,
            position,
            tint,
            overlay: OverlayState::default(),
        }
    }

    #[test]
    fn test_handles_are_sequential() {
        let mut sink = JsonLinesSink::new();
        let a = sink.place(&corner("i1", Point::ORIGIN, None));
        let b = sink.place(&corner("i2", Point::new(1.0, 2.0), None));
        assert_eq!((a, b), (1, 2));
        assert_eq!(sink.drain().len(), 2);
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn test_removing_drops_activation() {
        let mut sink = JsonLinesSink::new();
        let handle = sink.place(&corner("i1", Point::ORIGIN, Some(Tint::HINT)));
        sink.on_activate(&handle, PlaceRequest::house(&"i1".into()));
        assert_eq!(sink.activate(handle), Some(&PlaceRequest::house(&"i1".into())));

        sink.remove(handle);
        assert_eq!(sink.activate(handle), None);
        assert_eq!(sink.activatable_count(), 0);
        assert_eq!(
            sink.drain(),
            vec![
                OutboundMessage::Place {
                    handle: 1,
                    entity: EntityRef::Intersection("i1".into()),
                    kind: VisualKind::Intersection,
                    x: 0.0,
                    y: 0.0,
                    tint: Some(Tint::HINT),
                    overlay: OverlayState::default(),
                },
                OutboundMessage::Activatable { handle: 1 },
                OutboundMessage::Remove { handle: 1 },
            ]
        );
    }
}
