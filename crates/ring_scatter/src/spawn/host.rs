//! The collaborator that turns accepted positions into engine objects and back.
use glam::Vec2;

use crate::placement::Category;

/// Object factory and destruction hook for a spawn session.
///
/// The scheduler treats [`SpawnHost::Handle`] as opaque and keeps it only so
/// it can hand it back to [`SpawnHost::destroy`] on teardown.
pub trait SpawnHost {
    type Handle;

    /// Whether this host can instantiate `category`. Checked at session start
    /// for every category with a positive count.
    fn has_factory(&self, category: Category) -> bool;

    /// Called once per accepted placement.
    fn instantiate(&mut self, category: Category, position: Vec2) -> Self::Handle;

    /// Called once per stored handle during teardown.
    fn destroy(&mut self, handle: Self::Handle);
}

/// A host that keeps placements in memory; useful for headless runs and tests.
///
/// Handles are indices into [`RecordingHost::live`]; destroyed slots become `None`.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub tokens_enabled: bool,
    pub obstacles_enabled: bool,
    pub live: Vec<Option<(Category, Vec2)>>,
    pub destroyed: Vec<usize>,
}

impl RecordingHost {
    /// A host with factories for both categories.
    pub fn new() -> Self {
        Self {
            tokens_enabled: true,
            obstacles_enabled: true,
            live: Vec::new(),
            destroyed: Vec::new(),
        }
    }

    /// A host with a factory for `category` only.
    pub fn only(category: Category) -> Self {
        Self {
            tokens_enabled: category == Category::Token,
            obstacles_enabled: category == Category::Obstacle,
            ..Self::default()
        }
    }

    pub fn instantiated(&self) -> usize {
        self.live.len()
    }

    pub fn alive(&self) -> impl Iterator<Item = (Category, Vec2)> + '_ {
        self.live.iter().flatten().copied()
    }
}

impl SpawnHost for RecordingHost {
    type Handle = usize;

    fn has_factory(&self, category: Category) -> bool {
        match category {
            Category::Token => self.tokens_enabled,
            Category::Obstacle => self.obstacles_enabled,
        }
    }

    fn instantiate(&mut self, category: Category, position: Vec2) -> usize {
        self.live.push(Some((category, position)));
        self.live.len() - 1
    }

    fn destroy(&mut self, handle: usize) {
        if let Some(slot) = self.live.get_mut(handle) {
            *slot = None;
        }
        self.destroyed.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_host_tracks_lifecycle() {
        let mut host = RecordingHost::only(Category::Token);
        assert!(host.has_factory(Category::Token));
        assert!(!host.has_factory(Category::Obstacle));

        let a = host.instantiate(Category::Token, Vec2::new(1.0, 0.0));
        let b = host.instantiate(Category::Token, Vec2::new(2.0, 0.0));
        host.destroy(a);

        assert_eq!(host.instantiated(), 2);
        assert_eq!(host.destroyed, vec![a]);
        assert_eq!(
            host.alive().collect::<Vec<_>>(),
            vec![(Category::Token, Vec2::new(2.0, 0.0))]
        );
        assert_eq!(b, 1);
    }
}
