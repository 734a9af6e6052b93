//! Scene graph module
//!
//! Stand-in for the host's scene collaborator: it registers nodes, owns one
//! optional [`Arrangement`](crate::animation::Arrangement) and one optional
//! [`AnimationMachine`](crate::animation::AnimationMachine) per node, and
//! runs the per-frame update.
//!
//! - Node: hierarchy only (parent and children)
//! - Scene: node storage plus component maps
//! - SceneNode: chainable pose setters

pub mod node;
pub mod scene;
pub mod wrapper;

pub use node::Node;
pub use scene::Scene;
pub use wrapper::SceneNode;

use slotmap::new_key_type;

new_key_type! {
    /// Stable, weak handle to a scene node.
    pub struct NodeHandle;
}
