use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::Function;

/// Handle to one frame of an [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

impl FrameId {
    /// The root frame, alive for the whole run
    pub const ROOT: FrameId = FrameId(0);
}

/// How far a lookup may search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Only the given frame
    Local,
    /// The given frame, then each ancestor up to the root
    Chain,
}

/// Single frame in the environment
#[derive(Debug, Default)]
struct Frame {
    /// Variables bound in this frame
    variables: HashMap<String, String>,
    /// Functions bound in this frame
    functions: HashMap<String, Rc<Function>>,
    /// Parent frame (None for the root)
    parent: Option<FrameId>,
}

/// Environment for variable and function scoping
///
/// Frames live in an arena and refer to their parent by [`FrameId`]. Frames
/// are created per command invocation and discarded when it returns, so the
/// arena only ever grows and shrinks at its top.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Creates a new environment holding only the root frame
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::default()],
        }
    }

    /// Root frame handle
    pub fn root(&self) -> FrameId {
        FrameId::ROOT
    }

    /// Creates an empty frame whose parent is `parent`
    pub fn push_frame(&mut self, parent: FrameId) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            parent: Some(parent),
            ..Frame::default()
        });
        id
    }

    /// Discards `frame` and every frame created after it
    ///
    /// The root frame is never discarded.
    pub fn pop_frame(&mut self, frame: FrameId) {
        if frame != FrameId::ROOT {
            self.frames.truncate(frame.0);
        }
    }

    /// Number of live frames (1 when only the root exists)
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Parent of `frame`, if any
    pub fn parent(&self, frame: FrameId) -> Option<FrameId> {
        self.frames[frame.0].parent
    }

    /// Frames from `frame` up to the root, nearest first
    fn chain(&self, frame: FrameId) -> impl Iterator<Item = FrameId> + '_ {
        std::iter::successors(Some(frame), move |&id| self.parent(id))
    }

    /// Gets a variable value
    pub fn get_var(&self, frame: FrameId, name: &str, lookup: Lookup) -> Option<&str> {
        match lookup {
            Lookup::Local => self.frames[frame.0].variables.get(name),
            Lookup::Chain => self
                .chain(frame)
                .find_map(|id| self.frames[id.0].variables.get(name)),
        }
        .map(String::as_str)
    }

    /// Binds a variable in `frame` itself, replacing any existing binding there
    pub fn define_var(&mut self, frame: FrameId, name: impl Into<String>, value: impl Into<String>) {
        self.frames[frame.0]
            .variables
            .insert(name.into(), value.into());
    }

    /// Sets a variable value
    ///
    /// The nearest frame that already binds `name` is updated in place. If no
    /// frame in the chain binds it, the binding is created in the root-most
    /// frame of the chain, never in `frame` itself.
    pub fn set_var(&mut self, frame: FrameId, name: &str, value: impl Into<String>) {
        let target = self
            .binding_frame(frame, name)
            .or_else(|| self.chain(frame).last())
            .unwrap_or(frame);
        self.frames[target.0]
            .variables
            .insert(name.to_string(), value.into());
    }

    /// Updates an existing variable; returns false if `name` is bound nowhere in the chain
    pub fn update_var(&mut self, frame: FrameId, name: &str, value: impl Into<String>) -> bool {
        let Some(target) = self.binding_frame(frame, name) else {
            return false;
        };
        if let Some(slot) = self.frames[target.0].variables.get_mut(name) {
            *slot = value.into();
        }
        true
    }

    /// Removes a variable; returns false if `name` is bound nowhere in the chain
    pub fn delete_var(&mut self, frame: FrameId, name: &str) -> bool {
        match self.binding_frame(frame, name) {
            Some(target) => self.frames[target.0].variables.remove(name).is_some(),
            None => false,
        }
    }

    /// Nearest frame in the chain that binds variable `name`
    fn binding_frame(&self, frame: FrameId, name: &str) -> Option<FrameId> {
        self.chain(frame)
            .find(|id| self.frames[id.0].variables.contains_key(name))
    }

    /// Gets a function by name
    pub fn get_func(&self, frame: FrameId, name: &str, lookup: Lookup) -> Option<Rc<Function>> {
        match lookup {
            Lookup::Local => self.frames[frame.0].functions.get(name),
            Lookup::Chain => self
                .chain(frame)
                .find_map(|id| self.frames[id.0].functions.get(name)),
        }
        .cloned()
    }

    /// Binds a function in `frame` itself, replacing any existing binding there
    pub fn define_func(&mut self, frame: FrameId, name: impl Into<String>, function: Rc<Function>) {
        self.frames[frame.0].functions.insert(name.into(), function);
    }

    /// Returns a snapshot of the variables bound in `frame` alone
    pub fn variables(&self, frame: FrameId) -> HashMap<String, String> {
        self.frames[frame.0].variables.clone()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_name_not_found_either_way() {
        let mut env = Environment::new();
        let child = env.push_frame(env.root());

        assert_eq!(env.get_var(child, "x", Lookup::Local), None);
        assert_eq!(env.get_var(child, "x", Lookup::Chain), None);
        assert!(env.get_func(child, "f", Lookup::Local).is_none());
        assert!(env.get_func(child, "f", Lookup::Chain).is_none());
    }

    #[test]
    fn test_local_lookup_ignores_ancestors() {
        let mut env = Environment::new();
        let root = env.root();
        env.define_var(root, "x", "1");
        let child = env.push_frame(root);

        assert_eq!(env.get_var(child, "x", Lookup::Local), None);
        assert_eq!(env.get_var(child, "x", Lookup::Chain), Some("1"));
    }

    #[test]
    fn test_chain_lookup_finds_nearest() {
        let mut env = Environment::new();
        let root = env.root();
        env.define_var(root, "x", "outer");
        let mid = env.push_frame(root);
        env.define_var(mid, "x", "inner");
        let leaf = env.push_frame(mid);

        assert_eq!(env.get_var(leaf, "x", Lookup::Chain), Some("inner"));
    }

    #[test]
    fn test_set_var_mutates_ancestor_without_shadow() {
        let mut env = Environment::new();
        let root = env.root();
        let mid = env.push_frame(root);
        env.define_var(mid, "x", "1");
        let leaf = env.push_frame(mid);

        env.set_var(leaf, "x", "2");

        assert_eq!(env.get_var(mid, "x", Lookup::Local), Some("2"));
        assert_eq!(env.get_var(leaf, "x", Lookup::Local), None);
        assert_eq!(env.get_var(root, "x", Lookup::Local), None);
    }

    #[test]
    fn test_set_var_creates_new_binding_at_root() {
        let mut env = Environment::new();
        let mid = env.push_frame(env.root());
        let leaf = env.push_frame(mid);

        env.set_var(leaf, "fresh", "42");

        assert_eq!(env.get_var(env.root(), "fresh", Lookup::Local), Some("42"));
        assert_eq!(env.get_var(mid, "fresh", Lookup::Local), None);
        assert_eq!(env.get_var(leaf, "fresh", Lookup::Local), None);
    }

    #[test]
    fn test_update_and_delete_absent_name_fail() {
        let mut env = Environment::new();
        let root = env.root();
        env.define_var(root, "keep", "1");
        let child = env.push_frame(root);

        assert!(!env.update_var(child, "missing", "2"));
        assert!(!env.delete_var(child, "missing"));
        assert_eq!(env.variables(root).len(), 1);
        assert!(env.variables(child).is_empty());
    }

    #[test]
    fn test_update_and_delete_reach_ancestor() {
        let mut env = Environment::new();
        let root = env.root();
        env.define_var(root, "x", "1");
        let child = env.push_frame(root);

        assert!(env.update_var(child, "x", "5"));
        assert_eq!(env.get_var(root, "x", Lookup::Local), Some("5"));

        assert!(env.delete_var(child, "x"));
        assert_eq!(env.get_var(root, "x", Lookup::Local), None);
        assert!(!env.delete_var(child, "x"));
    }

    #[test]
    fn test_pop_frame_discards_frames_above() {
        let mut env = Environment::new();
        let a = env.push_frame(env.root());
        let _b = env.push_frame(a);
        assert_eq!(env.depth(), 3);

        env.pop_frame(a);
        assert_eq!(env.depth(), 1);

        env.pop_frame(env.root());
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn test_parent_links() {
        let mut env = Environment::new();
        let root = env.root();
        let child = env.push_frame(root);

        assert_eq!(env.parent(root), None);
        assert_eq!(env.parent(child), Some(root));
        assert_eq!(env.chain(child).collect::<Vec<_>>(), vec![child, root]);
    }
}
