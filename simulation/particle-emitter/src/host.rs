//! Capabilities the emitter needs from the embedding scene
//!
//! The simulation never owns visual objects. It asks the host to instantiate
//! and destroy them, to read and write their transforms, and to clone and fade
//! their materials. A host implements all three capability traits, which share
//! their handle types through [`SceneTypes`].

use glam::{Quat, Vec3};

/// Handle types shared by the capability traits
pub trait SceneTypes {
    /// Template a particle's visual object is instantiated from
    type Prefab;
    /// A node in the scene graph (emitter parent, scene root)
    type Node: Clone;
    /// An instantiated visual object owned by one particle
    type Object;
    /// A per-instance material clone
    type Material;
    /// Failure reported by the host's own error channel
    type Error;
}

/// Creation and destruction of visual objects
pub trait ObjectLifecycle: SceneTypes {
    /// Instantiate `prefab` as a child of `parent`
    fn instantiate(
        &mut self,
        prefab: &Self::Prefab,
        parent: &Self::Node,
    ) -> Result<Self::Object, Self::Error>;

    /// Destroy an object previously returned by [`instantiate`](Self::instantiate)
    fn destroy(&mut self, object: Self::Object) -> Result<(), Self::Error>;
}

/// Transform reads and writes on objects and scene nodes
pub trait TransformAccess: SceneTypes {
    /// Position of `object` relative to its parent
    fn local_position(&self, object: &Self::Object) -> Vec3;

    /// Move `object` relative to its parent
    fn set_local_position(&mut self, object: &Self::Object, position: Vec3);

    /// Rotation of `object` relative to its parent
    fn local_rotation(&self, object: &Self::Object) -> Quat;

    /// Rotate `object` relative to its parent
    fn set_local_rotation(&mut self, object: &Self::Object, rotation: Quat);

    /// Scale `object` relative to its parent
    fn set_local_scale(&mut self, object: &Self::Object, scale: Vec3);

    /// World-space position of a scene node
    fn world_position(&self, node: &Self::Node) -> Vec3;

    /// World-space rotation of a scene node
    fn world_rotation(&self, node: &Self::Node) -> Quat;

    /// The scene root world-space particles are parented to
    fn root_node(&self) -> Self::Node;
}

/// Material cloning and opacity writes
pub trait MaterialAccess: SceneTypes {
    /// Clone the main material of every mesh visual on `object` and its
    /// descendants, assign the clones back and return them
    fn clone_materials_recursive(&mut self, object: &Self::Object) -> Vec<Self::Material>;

    /// Set the alpha channel of a material's base color
    fn set_alpha(&mut self, material: &Self::Material, alpha: f32);
}

/// Everything the emitter needs from a scene
pub trait SceneHost: ObjectLifecycle + TransformAccess + MaterialAccess {}

impl<T: ObjectLifecycle + TransformAccess + MaterialAccess> SceneHost for T {}
