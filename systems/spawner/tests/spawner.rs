use std::{cell::RefCell, rc::Rc};

use blockyard_core::{
    Cell, EntityHost, FootprintSize, GridConfig, ObjectTypeDescriptor, ObjectTypeId,
    PlacementError, Template, UniformGrid,
};
use blockyard_system_spawner::{entity_name, Spawner};
use blockyard_world::Scene;
use glam::Vec3;

fn grid() -> UniformGrid {
    UniformGrid::new(GridConfig {
        cell_length: 1.0,
        dimensions: [10, 10, 10],
        center: [5.0, 0.0, 5.0],
    })
}

fn wall() -> ObjectTypeDescriptor {
    ObjectTypeDescriptor {
        id: ObjectTypeId::new(3),
        name: "wall".to_owned(),
        size: FootprintSize::new(2, 1, 2).expect("valid size"),
        template: Some(Template::new("prefabs/wall")),
    }
}

#[test]
fn spawn_places_entity_at_box_center_and_tags_it() {
    let mut spawner = Spawner::new();
    let mut scene = Scene::new();
    let origin = Cell::new(2, 0, 4);

    let tag = spawner
        .spawn(&grid(), &mut scene, origin, &wall())
        .expect("descriptor has a template");

    assert_eq!(tag.kind, ObjectTypeId::new(3));
    assert_eq!(tag.footprint.origin(), origin);
    assert_eq!(tag.footprint.size(), wall().size);

    let entity = scene.entity(tag.object).expect("entity was instantiated");
    assert_eq!(entity.position(), Vec3::new(3.0, 0.5, 5.0));
    assert_eq!(entity.name(), "wall_ID3_2_0_4");
    assert_eq!(entity.template().key(), "prefabs/wall");
    assert_eq!(scene.footprint_tag(tag.object), Some(tag));
}

#[test]
fn missing_template_is_rejected_before_instantiation() {
    let mut spawner = Spawner::new();
    let mut scene = Scene::new();
    let descriptor = ObjectTypeDescriptor {
        template: None,
        ..wall()
    };

    let result = spawner.spawn(&grid(), &mut scene, Cell::new(0, 0, 0), &descriptor);

    assert_eq!(
        result,
        Err(PlacementError::MissingTemplate {
            id: ObjectTypeId::new(3),
        })
    );
    assert!(scene.is_empty(), "no entity may be created without a template");
}

#[test]
fn hooks_observe_each_spawn_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut spawner = Spawner::new();
    let first = Rc::clone(&seen);
    spawner.add_hook(move |tag| first.borrow_mut().push(("first", tag.object)));
    let second = Rc::clone(&seen);
    spawner.add_hook(move |tag| second.borrow_mut().push(("second", tag.object)));

    let mut scene = Scene::new();
    let tag = spawner
        .spawn(&grid(), &mut scene, Cell::new(1, 0, 1), &wall())
        .expect("descriptor has a template");

    assert_eq!(
        *seen.borrow(),
        vec![("first", tag.object), ("second", tag.object)]
    );
}

#[test]
fn entity_name_encodes_type_and_origin() {
    assert_eq!(entity_name(&wall(), Cell::new(-1, 2, 7)), "wall_ID3_-1_2_7");
}
