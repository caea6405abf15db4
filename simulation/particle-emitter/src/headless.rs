//! In-memory scene host
//!
//! [`HeadlessScene`] implements every host capability without a renderer. It
//! keeps a flat list of scene nodes (index 0 is the root), the objects the
//! emitter instantiates with their local transforms, and a material table so
//! fades can be observed. Prefabs are trees of mesh visuals, each carrying a
//! list of material names; cloning walks that tree the same way an engine
//! walks an object's children.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use glam::{Quat, Vec3};
use thiserror::Error;

use crate::host::{MaterialAccess, ObjectLifecycle, SceneTypes, TransformAccess};

/// Identifier of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Identifier of an instantiated object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// Identifier of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Errors raised by the headless host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadlessError {
    /// Instantiation under a node that does not exist
    #[error("Unknown scene node: {0}")]
    UnknownNode(NodeId),

    /// Destruction of an object that does not exist or was already destroyed
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),
}

/// Template for a particle's visual object
///
/// Each prefab node is a mesh visual with zero or more materials, and may
/// have child visuals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessPrefab {
    /// Material names on this visual
    pub materials: Vec<String>,
    /// Child visuals
    pub children: Vec<HeadlessPrefab>,
}

impl HeadlessPrefab {
    /// A prefab with no materials anywhere
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single visual carrying the named materials
    pub fn with_materials(names: &[&str]) -> Self {
        Self {
            materials: names.iter().map(|name| (*name).to_string()).collect(),
            children: Vec::new(),
        }
    }

    /// Add a child visual
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Number of materials in this visual and all its descendants
    pub fn material_count(&self) -> usize {
        self.materials.len()
            + self
                .children
                .iter()
                .map(Self::material_count)
                .sum::<usize>()
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    world_position: Vec3,
    world_rotation: Quat,
}

#[derive(Debug, Clone)]
struct Visual {
    materials: Vec<MaterialId>,
    children: Vec<Visual>,
}

#[derive(Debug, Clone)]
struct SceneObject {
    parent: NodeId,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    visual: Visual,
}

#[derive(Debug, Clone)]
struct MaterialState {
    name: String,
    alpha: f32,
}

/// Renderer-free scene implementing all emitter host capabilities
#[derive(Debug, Clone)]
pub struct HeadlessScene {
    nodes: Vec<SceneNode>,
    objects: BTreeMap<ObjectId, SceneObject>,
    materials: HashMap<MaterialId, MaterialState>,
    shared_materials: HashMap<String, MaterialId>,
    next_object: u64,
    next_material: u64,
    instantiated: usize,
    destroyed: usize,
    destruction_log: Option<Vec<ObjectId>>,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessScene {
    /// Create a scene containing only a root node at the origin
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode {
                world_position: Vec3::ZERO,
                world_rotation: Quat::IDENTITY,
            }],
            objects: BTreeMap::new(),
            materials: HashMap::new(),
            shared_materials: HashMap::new(),
            next_object: 0,
            next_material: 0,
            instantiated: 0,
            destroyed: 0,
            destruction_log: None,
        }
    }

    /// Create a scene that also records every destroyed object in order
    ///
    /// The log grows with each destruction; long runs should use
    /// [`new`](Self::new) and read [`destroyed_count`](Self::destroyed_count).
    pub fn with_destruction_log() -> Self {
        Self {
            destruction_log: Some(Vec::new()),
            ..Self::new()
        }
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a scene node with the given world transform
    pub fn add_node(&mut self, world_position: Vec3, world_rotation: Quat) -> NodeId {
        self.nodes.push(SceneNode {
            world_position,
            world_rotation,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Move or rotate an existing node; returns `false` if it does not exist
    pub fn set_node_transform(
        &mut self,
        node: NodeId,
        world_position: Vec3,
        world_rotation: Quat,
    ) -> bool {
        match self.nodes.get_mut(node.0) {
            Some(scene_node) => {
                scene_node.world_position = world_position;
                scene_node.world_rotation = world_rotation;
                true
            }
            None => false,
        }
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Total objects ever instantiated
    pub fn instantiated_count(&self) -> usize {
        self.instantiated
    }

    /// Total objects ever destroyed
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Objects destroyed so far, in destruction order
    ///
    /// Empty unless the scene was built with
    /// [`with_destruction_log`](Self::with_destruction_log).
    pub fn destroyed(&self) -> &[ObjectId] {
        self.destruction_log.as_deref().unwrap_or_default()
    }

    /// Whether `object` is still alive
    pub fn contains(&self, object: &ObjectId) -> bool {
        self.objects.contains_key(object)
    }

    /// Node `object` was instantiated under
    pub fn parent_of(&self, object: &ObjectId) -> Option<NodeId> {
        self.objects.get(object).map(|o| o.parent)
    }

    /// Local scale of `object`
    pub fn local_scale(&self, object: &ObjectId) -> Option<Vec3> {
        self.objects.get(object).map(|o| o.scale)
    }

    /// Current alpha of a material
    pub fn alpha(&self, material: &MaterialId) -> Option<f32> {
        self.materials.get(material).map(|m| m.alpha)
    }

    /// Name a material was created or cloned from
    pub fn material_name(&self, material: &MaterialId) -> Option<&str> {
        self.materials.get(material).map(|m| m.name.as_str())
    }

    /// Materials currently assigned to `object` and its descendants
    pub fn assigned_materials(&self, object: &ObjectId) -> Vec<MaterialId> {
        let mut out = Vec::new();
        if let Some(o) = self.objects.get(object) {
            collect_materials(&o.visual, &mut out);
        }
        out
    }

    fn allocate_material(&mut self, name: String, alpha: f32) -> MaterialId {
        let id = MaterialId(self.next_material);
        self.next_material += 1;
        self.materials.insert(id, MaterialState { name, alpha });
        id
    }

    fn shared_material(&mut self, name: &str) -> MaterialId {
        if let Some(id) = self.shared_materials.get(name) {
            return *id;
        }
        let id = self.allocate_material(name.to_string(), 1.0);
        self.shared_materials.insert(name.to_string(), id);
        id
    }

    fn build_visual(&mut self, prefab: &HeadlessPrefab) -> Visual {
        let materials = prefab
            .materials
            .iter()
            .map(|name| self.shared_material(name))
            .collect();
        let children = prefab
            .children
            .iter()
            .map(|child| self.build_visual(child))
            .collect();
        Visual {
            materials,
            children,
        }
    }

    fn clone_visual(&mut self, visual: &mut Visual, out: &mut Vec<MaterialId>) {
        for slot in &mut visual.materials {
            let (name, alpha) = match self.materials.get(slot) {
                Some(source) => (source.name.clone(), source.alpha),
                None => continue,
            };
            let clone = self.allocate_material(name, alpha);
            *slot = clone;
            out.push(clone);
        }
        for child in &mut visual.children {
            self.clone_visual(child, out);
        }
    }
}

fn collect_materials(visual: &Visual, out: &mut Vec<MaterialId>) {
    out.extend_from_slice(&visual.materials);
    for child in &visual.children {
        collect_materials(child, out);
    }
}

impl SceneTypes for HeadlessScene {
    type Prefab = HeadlessPrefab;
    type Node = NodeId;
    type Object = ObjectId;
    type Material = MaterialId;
    type Error = HeadlessError;
}

impl ObjectLifecycle for HeadlessScene {
    fn instantiate(
        &mut self,
        prefab: &HeadlessPrefab,
        parent: &NodeId,
    ) -> Result<ObjectId, HeadlessError> {
        if parent.0 >= self.nodes.len() {
            return Err(HeadlessError::UnknownNode(*parent));
        }

        let visual = self.build_visual(prefab);
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.instantiated += 1;
        self.objects.insert(
            id,
            SceneObject {
                parent: *parent,
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                scale: Vec3::ONE,
                visual,
            },
        );
        Ok(id)
    }

    fn destroy(&mut self, object: ObjectId) -> Result<(), HeadlessError> {
        let removed = self
            .objects
            .remove(&object)
            .ok_or(HeadlessError::UnknownObject(object))?;

        let mut owned = Vec::new();
        collect_materials(&removed.visual, &mut owned);
        for material in owned {
            if !self.shared_materials.values().any(|shared| *shared == material) {
                self.materials.remove(&material);
            }
        }

        self.destroyed += 1;
        if let Some(log) = &mut self.destruction_log {
            log.push(object);
        }
        Ok(())
    }
}

impl TransformAccess for HeadlessScene {
    fn local_position(&self, object: &ObjectId) -> Vec3 {
        self.objects
            .get(object)
            .map_or(Vec3::ZERO, |o| o.position)
    }

    fn set_local_position(&mut self, object: &ObjectId, position: Vec3) {
        if let Some(o) = self.objects.get_mut(object) {
            o.position = position;
        }
    }

    fn local_rotation(&self, object: &ObjectId) -> Quat {
        self.objects
            .get(object)
            .map_or(Quat::IDENTITY, |o| o.rotation)
    }

    fn set_local_rotation(&mut self, object: &ObjectId, rotation: Quat) {
        if let Some(o) = self.objects.get_mut(object) {
            o.rotation = rotation;
        }
    }

    fn set_local_scale(&mut self, object: &ObjectId, scale: Vec3) {
        if let Some(o) = self.objects.get_mut(object) {
            o.scale = scale;
        }
    }

    fn world_position(&self, node: &NodeId) -> Vec3 {
        self.nodes
            .get(node.0)
            .map_or(Vec3::ZERO, |n| n.world_position)
    }

    fn world_rotation(&self, node: &NodeId) -> Quat {
        self.nodes
            .get(node.0)
            .map_or(Quat::IDENTITY, |n| n.world_rotation)
    }

    fn root_node(&self) -> NodeId {
        self.root()
    }
}

impl MaterialAccess for HeadlessScene {
    fn clone_materials_recursive(&mut self, object: &ObjectId) -> Vec<MaterialId> {
        let Some(mut visual) = self.objects.get(object).map(|o| o.visual.clone()) else {
            return Vec::new();
        };

        let mut clones = Vec::new();
        self.clone_visual(&mut visual, &mut clones);

        if let Some(o) = self.objects.get_mut(object) {
            o.visual = visual;
        }
        clones
    }

    fn set_alpha(&mut self, material: &MaterialId, alpha: f32) {
        if let Some(m) = self.materials.get_mut(material) {
            m.alpha = alpha;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_instantiate_and_destroy() {
        let mut scene = HeadlessScene::with_destruction_log();
        let root = scene.root();
        let object = scene.instantiate(&HeadlessPrefab::empty(), &root).unwrap();

        assert!(scene.contains(&object));
        assert_eq!(scene.parent_of(&object), Some(root));
        assert_eq!(scene.object_count(), 1);

        scene.destroy(object).unwrap();
        assert!(!scene.contains(&object));
        assert_eq!(scene.destroyed(), &[object]);
        assert_eq!(scene.destroyed_count(), 1);
        assert_eq!(
            scene.destroy(object),
            Err(HeadlessError::UnknownObject(object))
        );
        assert_eq!(scene.destroyed_count(), 1);
    }

    #[test]
    fn test_destructions_counted_without_log() {
        let mut scene = HeadlessScene::new();
        let root = scene.root();
        for _ in 0..100 {
            let object = scene.instantiate(&HeadlessPrefab::empty(), &root).unwrap();
            scene.destroy(object).unwrap();
        }

        assert_eq!(scene.instantiated_count(), 100);
        assert_eq!(scene.destroyed_count(), 100);
        assert!(scene.destroyed().is_empty());
    }

    #[test]
    fn test_instantiate_under_unknown_node() {
        let mut scene = HeadlessScene::new();
        let missing = NodeId(42);
        assert_eq!(
            scene.instantiate(&HeadlessPrefab::empty(), &missing),
            Err(HeadlessError::UnknownNode(missing))
        );
    }

    #[test]
    fn test_clone_walks_children() {
        let mut scene = HeadlessScene::new();
        let root = scene.root();
        let prefab = HeadlessPrefab::with_materials(&["a"]).child(
            HeadlessPrefab::empty().child(HeadlessPrefab::with_materials(&["b", "c"])),
        );
        assert_eq!(prefab.material_count(), 3);

        let object = scene.instantiate(&prefab, &root).unwrap();
        let shared = scene.assigned_materials(&object);
        let clones = scene.clone_materials_recursive(&object);

        assert_eq!(clones.len(), 3);
        assert_eq!(scene.assigned_materials(&object), clones);
        for (clone, original) in clones.iter().zip(&shared) {
            assert_ne!(clone, original);
            assert_eq!(scene.material_name(clone), scene.material_name(original));
        }
    }

    #[test]
    fn test_clones_are_independent() {
        let mut scene = HeadlessScene::new();
        let root = scene.root();
        let prefab = HeadlessPrefab::with_materials(&["a"]);
        let first = scene.instantiate(&prefab, &root).unwrap();
        let second = scene.instantiate(&prefab, &root).unwrap();

        let first_clones = scene.clone_materials_recursive(&first);
        let second_clones = scene.clone_materials_recursive(&second);
        scene.set_alpha(&first_clones[0], 0.25);

        assert_eq!(scene.alpha(&first_clones[0]), Some(0.25));
        assert_eq!(scene.alpha(&second_clones[0]), Some(1.0));
    }

    #[test]
    fn test_node_transforms() {
        let mut scene = HeadlessScene::new();
        let node = scene.add_node(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        assert_eq!(scene.world_position(&node), Vec3::new(1.0, 2.0, 3.0));

        let rotation = Quat::from_rotation_z(0.5);
        assert!(scene.set_node_transform(node, Vec3::ZERO, rotation));
        assert_eq!(scene.world_rotation(&node), rotation);
        assert!(!scene.set_node_transform(NodeId(99), Vec3::ZERO, rotation));
    }
}
