use std::collections::HashMap;

use log::info;

use crate::input::CursorProvider;
use crate::surface::Surface;

use super::{DrawStats, FrameStats, Result, Scene, SceneError};

/// Named scenes with at most one of them active.
///
/// Only the active scene is loaded, updated and rendered. Switching unloads
/// the outgoing scene before the incoming one loads.
#[derive(Default)]
pub struct Stage {
    scenes: HashMap<String, Scene>,
    active: Option<String>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `scene` under its own name. The scene is not activated.
    pub fn insert(&mut self, scene: Scene) -> Result<()> {
        let name = scene.name().to_owned();
        if self.scenes.contains_key(&name) {
            return Err(SceneError::DuplicateScene(name));
        }
        self.scenes.insert(name, scene);
        Ok(())
    }

    /// Makes `name` the active scene. Activating the active scene is a no-op.
    pub fn activate(&mut self, name: &str) -> Result<()> {
        if !self.scenes.contains_key(name) {
            return Err(SceneError::UnknownScene(name.to_owned()));
        }
        if self.active.as_deref() == Some(name) {
            return Ok(());
        }

        if let Some(outgoing) = self.active.take().and_then(|old| self.scenes.get_mut(&old)) {
            outgoing.unload();
        }
        if let Some(incoming) = self.scenes.get_mut(name) {
            incoming.load();
        }
        self.active = Some(name.to_owned());
        info!("active scene: '{name}'");
        Ok(())
    }

    /// Unloads the active scene and leaves none active.
    pub fn deactivate(&mut self) {
        if let Some(outgoing) = self.active.take().and_then(|old| self.scenes.get_mut(&old)) {
            outgoing.unload();
        }
    }

    /// Takes a scene out of the stage, unloading it first if it was active.
    pub fn remove(&mut self, name: &str) -> Result<Scene> {
        let mut scene = self.scenes.remove(name).ok_or_else(|| SceneError::UnknownScene(name.to_owned()))?;
        if self.active.as_deref() == Some(name) {
            self.active = None;
            scene.unload();
        }
        Ok(scene)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Scene> {
        self.active.as_deref().and_then(|name| self.scenes.get(name))
    }

    pub fn active_mut(&mut self) -> Option<&mut Scene> {
        self.active.as_deref().and_then(|name| self.scenes.get_mut(name))
    }

    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Updates the active scene; default stats when none is active.
    pub fn update(&mut self, cursor: &dyn CursorProvider) -> FrameStats {
        self.active_mut().map(|scene| scene.update(cursor)).unwrap_or_default()
    }

    /// Renders the active scene; draws nothing when none is active.
    pub fn render(&mut self, surface: &mut dyn Surface) -> DrawStats {
        self.active_mut().map(|scene| scene.render(surface)).unwrap_or_default()
    }
}
