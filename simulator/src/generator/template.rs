/// Distance along the ray at `angle` to the first hit on the circle centred
/// at `center`, if the ray reaches it in front of the sensor.
pub fn ray_circle_distance(angle: f32, center: [f32; 2], radius: f32) -> Option<f32> {
    let (sin, cos) = angle.sin_cos();
    let along = cos * center[0] + sin * center[1];
    let offset_sq = center[0] * center[0] + center[1] * center[1] - radius * radius;
    let discriminant = along * along - offset_sq;
    if discriminant < 0.0 {
        return None;
    }
    let distance = along - discriminant.sqrt();
    (distance > 0.0).then_some(distance)
}
