use crate::geom::{Item, Point};

/// Host capability that moves an item smoothly to a new top-left position.
///
/// The engine issues the request and does not wait for it; the host is expected to converge the
/// item's rendered position to `to` eventually. Plain closures qualify.
pub trait Animator {
    fn animate_move(&mut self, item: &Item, to: Point);
}

impl<F> Animator for F
where
    F: FnMut(&Item, Point),
{
    fn animate_move(&mut self, item: &Item, to: Point) {
        self(item, to)
    }
}

/// Collects requests instead of running them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingAnimator {
    pub requests: Vec<(String, Point)>,
}

impl Animator for RecordingAnimator {
    fn animate_move(&mut self, item: &Item, to: Point) {
        self.requests.push((item.id.clone(), to));
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingAnimator;
    use crate::engine::{GridLayoutEngine, GridOptions};
    use crate::geom::Item;
    use crate::random::XorShift64Star;

    #[test]
    fn recording_animator_captures_every_move_in_order() {
        let engine = GridLayoutEngine::new(GridOptions {
            node_width: 80.0,
            node_height: 80.0,
            cell_padding: 20.0,
            random_offset: 0.0,
            grid_width: 400.0,
            grid_height: 400.0,
        })
        .unwrap();
        let items = vec![
            Item::new("s", 0.0, 0.0, 80.0, 80.0),
            Item::new("a", 0.0, 0.0, 80.0, 80.0),
            Item::new("b", 0.0, 0.0, 80.0, 80.0),
        ];
        let plan = engine
            .plan(&items, &["a", "b"], &mut XorShift64Star::new(1))
            .unwrap();
        assert!(plan.is_complete());

        let mut recorder = RecordingAnimator::default();
        plan.animate(&items, &mut recorder);
        let got: Vec<(&str, f64, f64)> = recorder
            .requests
            .iter()
            .map(|(id, p)| (id.as_str(), p.x, p.y))
            .collect();
        assert_eq!(got, vec![("a", 140.0, 20.0), ("b", 260.0, 20.0)]);
    }
}
