//! Tests for cardinal faces, their vectors and quarter-turn rotations

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chunkweave::math::geometry::angle360;
    use chunkweave::spatial::face::Face;
    use glam::IVec2;

    // Tests that opposite faces negate each other's vectors
    // Verified by mapping Up to Left in opposite
    #[test]
    fn test_opposite_negates_vector() {
        for face in Face::ALL {
            assert_eq!(face.opposite().vector(), -face.vector());
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    // Tests conversion between faces and unit vectors
    // Verified by swapping the Right and Left vectors
    #[test]
    fn test_vector_round_trip() {
        assert_eq!(Face::Up.vector(), IVec2::new(0, 1));
        assert_eq!(Face::Right.vector(), IVec2::new(1, 0));
        for face in Face::ALL {
            assert_eq!(Face::from_vector(face.vector()), Some(face));
        }
        assert_eq!(Face::from_vector(IVec2::new(1, 1)), None);
    }

    // Tests that a positive quarter turn moves counter-clockwise
    // Verified by stepping forwards through the clockwise face list
    #[test]
    fn test_rotated_counter_clockwise() {
        assert_eq!(Face::Up.rotated(90.0), Face::Left);
        assert_eq!(Face::Left.rotated(90.0), Face::Down);
        assert_eq!(Face::Up.rotated(-90.0), Face::Right);
        assert_eq!(Face::Right.rotated(180.0), Face::Left);
        assert_eq!(Face::Down.rotated(360.0), Face::Down);
        assert_eq!(Face::Down.rotated(-270.0), Face::Right);
    }

    // Tests that rotation_to agrees with the measured angle between face vectors
    // Verified by reversing the index difference
    #[test]
    fn test_rotation_to_matches_angle360() {
        for from in Face::ALL {
            for to in Face::ALL {
                let exact = from.rotation_to(to);
                let measured = angle360(from.vector().as_vec2(), to.vector().as_vec2());
                assert_relative_eq!(exact, measured, epsilon = 1e-3);
                assert_eq!(from.rotated(exact), to);
            }
        }
    }

    // Tests lowercase display names used in diagnostics
    // Verified by printing the debug representation instead
    #[test]
    fn test_display() {
        assert_eq!(Face::Up.to_string(), "up");
        assert_eq!(Face::Left.to_string(), "left");
    }

    // Tests stepping across a face, including at the edge of the grid
    // Verified by wrapping around on overflow
    #[test]
    fn test_step_stops_at_grid_limits() {
        assert_eq!(Face::Up.step(IVec2::new(2, 3)), Some(IVec2::new(2, 4)));
        assert_eq!(Face::Left.step(IVec2::new(2, 3)), Some(IVec2::new(1, 3)));
        assert_eq!(Face::Right.step(IVec2::new(i32::MAX, 0)), None);
        assert_eq!(Face::Down.step(IVec2::new(0, i32::MIN)), None);
        assert_eq!(
            Face::Up.step(IVec2::new(i32::MAX, 0)),
            Some(IVec2::new(i32::MAX, 1))
        );
    }
}
