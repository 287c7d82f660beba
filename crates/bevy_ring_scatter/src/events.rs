use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use ring_scatter::prelude::{EventSink, SpawnEvent};

/// Bevy message containing the spawner entity and the underlying [`SpawnEvent`].
#[derive(Message, Debug, Clone)]
pub struct RingScatterMessage {
    pub spawner: Entity,
    pub event: SpawnEvent,
}

/// Bus carrying spawn events from systems and observers to the message queue.
#[derive(Resource)]
pub struct RingScatterBus {
    pub tx: Sender<RingScatterMessage>,
    pub rx: Receiver<RingScatterMessage>,
}

impl Default for RingScatterBus {
    fn default() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }
}

impl RingScatterBus {
    /// A sink tagging every event with `spawner`.
    pub fn sink(&self, spawner: Entity) -> ChannelSink {
        ChannelSink {
            spawner,
            tx: self.tx.clone(),
        }
    }
}

/// Event sink that forwards events to the [`RingScatterBus`], tagging each event with the spawner.
pub struct ChannelSink {
    pub spawner: Entity,
    pub tx: Sender<RingScatterMessage>,
}

impl EventSink for ChannelSink {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        let _ = self.tx.send(RingScatterMessage {
            spawner: self.spawner,
            event,
        });
    }
}

pub(crate) fn drain_ring_scatter_messages(
    bus: Res<RingScatterBus>,
    mut messages: ResMut<Messages<RingScatterMessage>>,
) {
    while let Ok(message) = bus.rx.try_recv() {
        messages.write(message);
    }
}
