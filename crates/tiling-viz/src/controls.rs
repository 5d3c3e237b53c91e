//! Keyboard and mouse handling for the tiling viewer.

use macroquad::prelude::*;
use nalgebra::Vector2;
use tiling_core::{Tiling, TilingError, MAX_SIDES, MIN_SIDES};

use crate::Screen;

/// An editing or view action triggered by a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Add(usize),
    RemoveLast,
    Clear,
    Advance,
    Retreat,
    ZoomIn,
    ZoomOut,
}

impl Command {
    /// Maps a key to a command.
    ///
    /// Digits 3 to 9 add a polygon with that many sides, 0 to 2 add 10 to 12
    /// sides. Tab moves the cursor forward, shift+Tab backward.
    pub fn from_key(key: KeyCode, shift: bool) -> Option<Self> {
        let command = match key {
            KeyCode::Tab if shift => Command::Retreat,
            KeyCode::Tab | KeyCode::Right => Command::Advance,
            KeyCode::Left => Command::Retreat,
            KeyCode::Backspace => Command::RemoveLast,
            KeyCode::Delete | KeyCode::C => Command::Clear,
            KeyCode::Equal | KeyCode::KpAdd => Command::ZoomIn,
            KeyCode::Minus | KeyCode::KpSubtract => Command::ZoomOut,
            key => {
                let digit = digit_of(key)?;
                let sides = if digit < MIN_SIDES { digit + 10 } else { digit };
                debug_assert!(sides <= MAX_SIDES);
                Command::Add(sides)
            }
        };
        Some(command)
    }

    /// Runs the command against the tiling.
    pub fn apply(self, tiling: &mut Tiling) -> Result<(), TilingError> {
        match self {
            Command::Add(sides) => tiling.add_polygon(sides).map(drop),
            Command::RemoveLast => tiling.remove_last_polygon(),
            Command::Clear => {
                tiling.clear();
                Ok(())
            }
            Command::Advance => {
                tiling.advance_cursor();
                Ok(())
            }
            Command::Retreat => {
                tiling.retreat_cursor();
                Ok(())
            }
            Command::ZoomIn => {
                tiling.view_mut().zoom_in();
                Ok(())
            }
            Command::ZoomOut => {
                tiling.view_mut().zoom_out();
                Ok(())
            }
        }
    }
}

fn digit_of(key: KeyCode) -> Option<usize> {
    let digit = match key {
        KeyCode::Key0 | KeyCode::Kp0 => 0,
        KeyCode::Key1 | KeyCode::Kp1 => 1,
        KeyCode::Key2 | KeyCode::Kp2 => 2,
        KeyCode::Key3 | KeyCode::Kp3 => 3,
        KeyCode::Key4 | KeyCode::Kp4 => 4,
        KeyCode::Key5 | KeyCode::Kp5 => 5,
        KeyCode::Key6 | KeyCode::Kp6 => 6,
        KeyCode::Key7 | KeyCode::Kp7 => 7,
        KeyCode::Key8 | KeyCode::Kp8 => 8,
        KeyCode::Key9 | KeyCode::Kp9 => 9,
        _ => return None,
    };
    Some(digit)
}

/// World-space pan for a mouse drag of `delta` pixels, so the content follows
/// the pointer. Screen y points down, world y points up.
pub fn drag_direction(delta: Vec2, screen: &Screen, zoom: f64, pan_speed: f32) -> Vector2<f64> {
    let per_pixel = f64::from(pan_speed) / (f64::from(screen.scale()) * zoom);
    Vector2::new(-f64::from(delta.x), f64::from(delta.y)) * per_pixel
}

/// Interactive input state: drag tracking and the last failed command.
pub struct Controls {
    pan_speed: f32,
    last_mouse: Option<Vec2>,
    last_error: Option<TilingError>,
}

impl Controls {
    pub fn new(pan_speed: f32) -> Self {
        Self {
            pan_speed,
            last_mouse: None,
            last_error: None,
        }
    }

    /// The error of the most recent failed command, cleared by the next success.
    pub fn last_error(&self) -> Option<&TilingError> {
        self.last_error.as_ref()
    }

    /// Runs one command and records its outcome.
    pub fn run(&mut self, command: Command, tiling: &mut Tiling) -> bool {
        log::trace!("running {command:?}");
        match command.apply(tiling) {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("{command:?} failed: {err}");
                self.last_error = Some(err);
                false
            }
        }
    }

    /// Handles keyboard and mouse input.
    /// Returns true if the tiling or the view changed.
    pub fn update(&mut self, tiling: &mut Tiling, screen: &Screen) -> bool {
        let mut changed = false;
        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);

        for key in get_keys_pressed() {
            if let Some(command) = Command::from_key(key, shift) {
                changed |= self.run(command, tiling);
            }
        }

        let (_, wheel) = mouse_wheel();
        if wheel > 0.0 {
            changed |= self.run(Command::ZoomIn, tiling);
        } else if wheel < 0.0 {
            changed |= self.run(Command::ZoomOut, tiling);
        }

        let mouse = Vec2::from(mouse_position());
        if is_mouse_button_down(MouseButton::Left) {
            if let Some(previous) = self.last_mouse {
                let delta = mouse - previous;
                if delta != Vec2::ZERO {
                    let zoom = tiling.view().zoom();
                    let direction = drag_direction(delta, screen, zoom, self.pan_speed);
                    tiling.view_mut().translate(direction);
                    changed = true;
                }
            }
            self.last_mouse = Some(mouse);
        } else {
            self.last_mouse = None;
        }

        changed
    }

    /// Draws the status overlay.
    pub fn draw_ui(&self, tiling: &Tiling, y_offset: f32, show_help: bool) {
        draw_text(
            &format!(
                "Polygons: {} | Open edges: {} | Links: {}",
                tiling.polygon_count(),
                tiling.boundary_len(),
                tiling.link_count()
            ),
            10.0,
            y_offset,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Cursor: {} | Zoom: {}",
                tiling.current_cursor_edge(),
                tiling.view().zoom()
            ),
            10.0,
            y_offset + 20.0,
            18.0,
            GRAY,
        );
        if let Some(err) = &self.last_error {
            draw_text(&err.to_string(), 10.0, y_offset + 40.0, 18.0, ORANGE);
        }
        if show_help {
            draw_text(
                "[3-9] add | [0-2] add 10-12 | [Tab]/[Shift+Tab] move cursor",
                10.0,
                y_offset + 60.0,
                16.0,
                DARKGRAY,
            );
            draw_text(
                "[Backspace] remove last | [Del] clear | [+]/[-] zoom | drag to pan",
                10.0,
                y_offset + 76.0,
                16.0,
                DARKGRAY,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_add_polygons() {
        assert_eq!(Command::from_key(KeyCode::Key3, false), Some(Command::Add(3)));
        assert_eq!(Command::from_key(KeyCode::Kp9, false), Some(Command::Add(9)));
        assert_eq!(Command::from_key(KeyCode::Key0, false), Some(Command::Add(10)));
        assert_eq!(Command::from_key(KeyCode::Kp1, false), Some(Command::Add(11)));
        assert_eq!(Command::from_key(KeyCode::Key2, true), Some(Command::Add(12)));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(Command::from_key(KeyCode::Q, false), None);
        assert_eq!(Command::from_key(KeyCode::Space, true), None);
    }

    #[test]
    fn delete_clears_and_backspace_removes() {
        assert_eq!(Command::from_key(KeyCode::Delete, false), Some(Command::Clear));
        assert_eq!(Command::from_key(KeyCode::Backspace, false), Some(Command::RemoveLast));
    }

    #[test]
    fn shift_reverses_tab() {
        assert_eq!(Command::from_key(KeyCode::Tab, false), Some(Command::Advance));
        assert_eq!(Command::from_key(KeyCode::Tab, true), Some(Command::Retreat));
    }

    #[test]
    fn commands_drive_the_tiling() {
        let mut tiling = Tiling::new();
        Command::Add(4).apply(&mut tiling).unwrap();
        Command::Advance.apply(&mut tiling).unwrap();
        Command::Add(3).apply(&mut tiling).unwrap();
        assert_eq!(tiling.polygon_count(), 2);

        Command::RemoveLast.apply(&mut tiling).unwrap();
        assert_eq!(tiling.polygon_count(), 1);

        Command::ZoomIn.apply(&mut tiling).unwrap();
        assert_eq!(tiling.view().zoom(), 2.0);

        Command::Clear.apply(&mut tiling).unwrap();
        assert!(tiling.is_empty());
        assert_eq!(tiling.view().zoom(), 2.0);
    }

    #[test]
    fn failed_commands_are_remembered() {
        let mut tiling = Tiling::new();
        let mut controls = Controls::new(1.0);
        assert!(!controls.run(Command::Add(13), &mut tiling));
        assert!(matches!(
            controls.last_error(),
            Some(TilingError::InvalidSideCount { sides: 13, .. })
        ));
        assert!(controls.run(Command::Add(5), &mut tiling));
        assert!(controls.last_error().is_none());
    }

    #[test]
    fn drag_follows_the_pointer() {
        let screen = Screen::new(400.0, 400.0);
        let direction = drag_direction(vec2(200.0, -100.0), &screen, 2.0, 1.0);
        assert_eq!(direction, Vector2::new(-0.5, -0.25));
    }
}
