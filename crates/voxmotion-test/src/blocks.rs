//! Block state constructors matching the [`crate::ids`] layout.

use voxmotion_core::{Aabb, BlockState, BlockTypeId};

use crate::ids;

fn id(raw: u32) -> BlockTypeId {
    BlockTypeId(raw)
}

/// Thin box hugging the face opposite to `facing`, the way wall-mounted
/// blocks sit against their support.
fn wall_shape(facing: &str) -> Aabb {
    const T: f64 = 0.1875;
    match facing {
        "north" => Aabb::from_array([0.0, 0.0, 1.0 - T, 1.0, 1.0, 1.0]),
        "south" => Aabb::from_array([0.0, 0.0, 0.0, 1.0, 1.0, T]),
        "west" => Aabb::from_array([1.0 - T, 0.0, 0.0, 1.0, 1.0, 1.0]),
        _ => Aabb::from_array([0.0, 0.0, 0.0, T, 1.0, 1.0]),
    }
}

#[must_use]
pub fn air() -> BlockState {
    BlockState::empty(id(ids::AIR))
}

#[must_use]
pub fn stone() -> BlockState {
    BlockState::full_cube(id(ids::STONE))
}

#[must_use]
pub fn dirt() -> BlockState {
    BlockState::full_cube(id(ids::DIRT))
}

#[must_use]
pub fn grass() -> BlockState {
    BlockState::full_cube(id(ids::GRASS))
}

/// Water with the given level; 0 is a source, 8 and above is falling water.
#[must_use]
pub fn water(level: u8) -> BlockState {
    BlockState::empty(id(ids::WATER)).with_metadata(level)
}

/// Legacy flowing water id.
#[must_use]
pub fn flowing_water(level: u8) -> BlockState {
    BlockState::empty(id(ids::FLOWING_WATER)).with_metadata(level)
}

#[must_use]
pub fn lava(level: u8) -> BlockState {
    BlockState::empty(id(ids::LAVA)).with_metadata(level)
}

#[must_use]
pub fn soul_sand() -> BlockState {
    BlockState::empty(id(ids::SOUL_SAND))
        .with_shapes(vec![Aabb::from_array([0.0, 0.0, 0.0, 1.0, 0.875, 1.0])])
}

#[must_use]
pub fn honey() -> BlockState {
    BlockState::empty(id(ids::HONEY)).with_shapes(vec![Aabb::from_array([
        0.0625, 0.0, 0.0625, 0.9375, 0.9375, 0.9375,
    ])])
}

#[must_use]
pub fn cobweb() -> BlockState {
    BlockState::empty(id(ids::COBWEB))
}

#[must_use]
pub fn slime() -> BlockState {
    BlockState::full_cube(id(ids::SLIME))
}

#[must_use]
pub fn ice() -> BlockState {
    BlockState::full_cube(id(ids::ICE))
}

#[must_use]
pub fn packed_ice() -> BlockState {
    BlockState::full_cube(id(ids::PACKED_ICE))
}

#[must_use]
pub fn blue_ice() -> BlockState {
    BlockState::full_cube(id(ids::BLUE_ICE))
}

#[must_use]
pub fn seagrass() -> BlockState {
    BlockState::empty(id(ids::SEAGRASS))
}

#[must_use]
pub fn kelp() -> BlockState {
    BlockState::empty(id(ids::KELP))
}

/// Ladder attached to the wall it faces away from.
#[must_use]
pub fn ladder(facing: &str) -> BlockState {
    BlockState::empty(id(ids::LADDER))
        .with_shapes(vec![wall_shape(facing)])
        .with_property("facing", facing)
}

#[must_use]
pub fn vine() -> BlockState {
    BlockState::empty(id(ids::VINE))
}

/// Bubble column; `drag_down` selects the magma (downward) variant.
#[must_use]
pub fn bubble_column(drag_down: bool) -> BlockState {
    BlockState::empty(id(ids::BUBBLE_COLUMN))
        .with_metadata(u8::from(!drag_down))
        .with_property("drag", drag_down)
}

/// Scaffolding; `bottom` marks an unsupported piece with a floor slab.
#[must_use]
pub fn scaffolding(bottom: bool) -> BlockState {
    let mut shapes = vec![Aabb::from_array([0.0, 0.875, 0.0, 1.0, 1.0, 1.0])];
    for (x, z) in [(0.0, 0.0), (0.875, 0.0), (0.0, 0.875), (0.875, 0.875)] {
        shapes.push(Aabb::from_array([x, 0.0, z, x + 0.125, 0.875, z + 0.125]));
    }
    BlockState::empty(id(ids::SCAFFOLDING))
        .with_shapes(shapes)
        .with_property("bottom", bottom)
}

/// Oak trapdoor, either closed on the floor or open against a wall.
#[must_use]
pub fn trapdoor(open: bool, facing: &str) -> BlockState {
    let shape = if open {
        wall_shape(facing)
    } else {
        Aabb::from_array([0.0, 0.0, 0.0, 1.0, 0.1875, 1.0])
    };
    BlockState::empty(id(ids::OAK_TRAPDOOR))
        .with_shapes(vec![shape])
        .with_property("open", open)
        .with_property("facing", facing)
        .with_property("half", "bottom")
}
