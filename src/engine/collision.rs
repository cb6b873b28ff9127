use crate::engine::entity::{Entity, Shape};

/// Precise overlap between two entities' collision shapes.
pub fn collides(a: &dyn Entity, b: &dyn Entity) -> bool {
    let a_at = a.bounds().origin();
    let b_at = b.bounds().origin();

    match (a.collision_shape(), b.collision_shape()) {
        (Shape::Mask(ma), Shape::Mask(mb)) => ma.overlaps(a_at, mb, b_at),
        (Shape::Cell(ax, ay), Shape::Cell(bx, by)) => ax == bx && ay == by,
        (Shape::Mask(m), Shape::Cell(cx, cy)) => m.get(cx - a_at.0, cy - a_at.1),
        (Shape::Cell(cx, cy), Shape::Mask(m)) => m.get(cx - b_at.0, cy - b_at.1),
    }
}

/// Does `actor` touch any of `obstacles`?
pub fn hits_any<'a, E, I>(actor: &dyn Entity, obstacles: I) -> bool
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    obstacles.into_iter().any(|o| collides(actor, o))
}

/// Vertical escape from the visible play region.
pub fn out_of_vertical_bounds(actor: &dyn Entity, region_height: f64) -> bool {
    let b = actor.bounds();
    b.y <= 0.0 || b.bottom() >= region_height
}

/// Is a grid cell inside the inclusive playable rectangle?
pub fn cell_in_bounds(cell: (i32, i32), min: (i32, i32), max: (i32, i32)) -> bool {
    cell.0 >= min.0 && cell.0 <= max.0 && cell.1 >= min.1 && cell.1 <= max.1
}
