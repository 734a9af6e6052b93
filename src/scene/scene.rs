use slotmap::{SecondaryMap, SlotMap};

use crate::animation::{AnimationMachine, AnimationSystem, Arrangement, ArrangementTargets};
use crate::engine::SpriteEngine;
use crate::scene::node::Node;
use crate::scene::wrapper::SceneNode;
use crate::scene::NodeHandle;
use crate::settings::AnimationSettings;
use crate::utils::{Clock, Time};

/// Scene graph.
///
/// Owns the node hierarchy and, per node, an optional [`Arrangement`] and
/// an optional [`AnimationMachine`]. Removing a node drops both; machines
/// elsewhere that still target the node simply skip it.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Components ====
    pub arrangements: SecondaryMap<NodeHandle, Arrangement>,
    pub animations: SecondaryMap<NodeHandle, AnimationMachine>,

    pub settings: AnimationSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: AnimationSettings) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            arrangements: SecondaryMap::new(),
            animations: SecondaryMap::new(),
            settings,
        }
    }

    /// A clock running at the configured tick rate.
    #[must_use]
    pub fn clock(&self) -> Clock {
        Clock::with_rate(self.settings.ticks_per_second)
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Creates an empty root node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    /// Adds a node to the scene as a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found, adding child as root");
            return self.add_node(child);
        }
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    /// Moves `child` under `parent`, detaching it from its old parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) {
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        // 1. Detach from old
        self.detach_from_parent(child);

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn detach_from_parent(&mut self, handle: NodeHandle) {
        let old_parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == handle)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }
    }

    /// Removes a node and its subtree, together with their components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        self.detach_from_parent(handle);

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
            self.arrangements.remove(current);
            self.animations.remove(current);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Chainable access to a node's pose.
    pub fn node(&mut self, handle: NodeHandle) -> SceneNode<'_> {
        SceneNode::new(self, handle)
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Attaches an arrangement to a node, returning the previous one.
    /// Ignored (and returned back) if the node does not exist.
    pub fn set_arrangement(&mut self, handle: NodeHandle, arrangement: Arrangement) -> Option<Arrangement> {
        if !self.nodes.contains_key(handle) {
            log::warn!("set_arrangement on a node that is not in the scene");
            return Some(arrangement);
        }
        self.arrangements.insert(handle, arrangement)
    }

    #[must_use]
    pub fn arrangement(&self, handle: NodeHandle) -> Option<&Arrangement> {
        self.arrangements.get(handle)
    }

    pub fn arrangement_mut(&mut self, handle: NodeHandle) -> Option<&mut Arrangement> {
        self.arrangements.get_mut(handle)
    }

    /// Attaches an animation machine to a node, returning the previous one.
    /// Ignored (and returned back) if the node does not exist.
    pub fn set_animation(&mut self, handle: NodeHandle, machine: AnimationMachine) -> Option<AnimationMachine> {
        if !self.nodes.contains_key(handle) {
            log::warn!("set_animation on a node that is not in the scene");
            return Some(machine);
        }
        self.animations.insert(handle, machine)
    }

    #[must_use]
    pub fn animation(&self, handle: NodeHandle) -> Option<&AnimationMachine> {
        self.animations.get(handle)
    }

    pub fn animation_mut(&mut self, handle: NodeHandle) -> Option<&mut AnimationMachine> {
        self.animations.get_mut(handle)
    }

    /// Resets the machine on `handle` at `now`, taking its transforms off
    /// the scene's arrangements. Returns `false` if the node has no machine.
    pub fn reset_animation(&mut self, handle: NodeHandle, now: Time) -> bool {
        let Some(machine) = self.animations.get_mut(handle) else {
            return false;
        };
        machine.reset(now, &mut self.arrangements);
        true
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Runs one frame at `now`.
    ///
    /// Machines transition first so that transforms installed this tick are
    /// visible in this frame's arrangement. Squashing (if enabled) happens
    /// in between; it does not change what is emitted.
    pub fn update<E: SpriteEngine + ?Sized>(&mut self, engine: &mut E, now: Time) {
        AnimationSystem::update(self, now);
        if self.settings.auto_squash {
            self.squash(now);
        }
        self.arrange(engine, now);
    }

    /// Commits expired transforms of every arrangement. Returns the total
    /// number committed.
    pub fn squash(&mut self, now: Time) -> usize {
        self.arrangements.values_mut().map(|ar| ar.squash(now)).sum()
    }

    /// Emits every visible arranged node, depth-first from the roots in
    /// child order.
    pub fn arrange<E: SpriteEngine + ?Sized>(&self, engine: &mut E, now: Time) {
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            if let Some(ar) = self.arrangements.get(handle) {
                ar.arrange(engine, handle, now);
            }
            stack.extend(node.children.iter().rev().copied());
        }
    }
}

impl ArrangementTargets for Scene {
    #[inline]
    fn arrangement_mut(&mut self, node: NodeHandle) -> Option<&mut Arrangement> {
        self.arrangements.get_mut(node)
    }
}
