use crate::game::GameState;

use super::icons::{IconLookup, IconSource};
use super::surface::{Shade, Surface};

/// Paint one frame of a run onto a surface
pub fn draw_scene<S, I>(state: &GameState, surface: &mut S, icons: &I)
where
    S: Surface + ?Sized,
    I: IconSource + ?Sized,
{
    surface.clear();

    for food in &state.foods {
        let shade = Shade::Food {
            kind: food.kind,
            verified: food.verified,
        };
        match icons.resolve(&food.identity) {
            IconLookup::Image(icon) => surface.draw_image(food.position, &icon, shade),
            IconLookup::Fallback => surface.fill_circle(food.position, shade),
        }
    }

    for segment in state.snake.body.iter().skip(1) {
        surface.fill_rect(*segment, Shade::Body);
    }
    surface.fill_rect(state.snake.head(), Shade::Head);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Food, FoodKind, GameState, Position, Snake};
    use crate::render::icons::IconIndex;
    use crate::render::surface::{DrawCommand, RecordingSurface};

    fn sample_state() -> GameState {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = GameState::new(snake, 10, 90, 140);
        state
            .foods
            .push(Food::new(Position::new(1, 1), FoodKind::Fraud, "Arbitrum"));
        state
            .foods
            .push(Food::new(Position::new(2, 2), FoodKind::Normal, "Ethereum"));
        state
    }

    #[test]
    fn test_scene_with_fallback_shapes() {
        let mut surface = RecordingSurface::default();
        draw_scene(&sample_state(), &mut surface, &IconIndex::empty());

        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::Clear,
                DrawCommand::Circle(
                    Position::new(1, 1),
                    Shade::Food {
                        kind: FoodKind::Fraud,
                        verified: false
                    }
                ),
                DrawCommand::Circle(
                    Position::new(2, 2),
                    Shade::Food {
                        kind: FoodKind::Normal,
                        verified: false
                    }
                ),
                DrawCommand::Rect(Position::new(4, 5), Shade::Body),
                DrawCommand::Rect(Position::new(3, 5), Shade::Body),
                DrawCommand::Rect(Position::new(5, 5), Shade::Head),
            ]
        );
    }

    #[test]
    fn test_scene_uses_icons_when_available() {
        let icons = IconIndex::from_json(r#"{ "Arbitrum": "A" }"#).unwrap();
        let mut surface = RecordingSurface::default();
        draw_scene(&sample_state(), &mut surface, &icons);

        assert!(surface.commands.contains(&DrawCommand::Image(
            Position::new(1, 1),
            'A',
            Shade::Food {
                kind: FoodKind::Fraud,
                verified: false
            }
        )));
        assert!(surface.commands.contains(&DrawCommand::Circle(
            Position::new(2, 2),
            Shade::Food {
                kind: FoodKind::Normal,
                verified: false
            }
        )));
    }
}
