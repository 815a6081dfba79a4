//! Flat-color drawing of a running scene

use macroquad::prelude::*;

use jumpman::game::components::{Body, Kind, Shape};
use jumpman::game::player::{PlayerPhase, PlayerPose};
use jumpman::game::{Hud, Scene};

const SKY: Color = Color::new(0.42, 0.72, 0.93, 1.0);
const GROUND: Color = Color::new(0.36, 0.25, 0.18, 1.0);
const PAD: Color = Color::new(0.2, 0.85, 0.35, 1.0);
const PAD_COOLDOWN: Color = Color::new(0.55, 0.55, 0.55, 1.0);
const COIN: Color = Color::new(1.0, 0.84, 0.1, 1.0);
const RING: Color = Color::new(0.95, 0.3, 0.85, 1.0);
const SPIKE: Color = Color::new(0.75, 0.75, 0.8, 1.0);
const SMASHER: Color = Color::new(0.4, 0.4, 0.45, 1.0);
const CRAWLER: Color = Color::new(0.8, 0.25, 0.2, 1.0);
const FLYER: Color = Color::new(0.55, 0.2, 0.75, 1.0);
const PLAYER: Color = Color::new(0.15, 0.3, 0.9, 1.0);
const PLAYER_BOOST: Color = Color::new(1.0, 0.55, 0.1, 1.0);
const PLAYER_DYING: Color = Color::new(1.0, 0.2, 0.2, 1.0);
const GOAL: Color = Color::new(1.0, 1.0, 1.0, 0.8);

/// Sprite-sized rect around a body's position, shifted into screen space
fn sprite_rect(body: &Body, scroll_x: f32, scroll_y: f32) -> Rect {
    let (w, h) = match body.shape {
        Shape::Rect { width, height } => (width, height),
        Shape::Circle { radius } => (radius * 2.0, radius * 2.0),
    };
    Rect::new(
        body.position.x - w * 0.5 - scroll_x,
        body.position.y - h * 0.5 - scroll_y,
        w,
        h,
    )
}

pub fn draw_scene(scene: &Scene) {
    clear_background(SKY);

    let scroll = scene.camera().scroll;
    let world = scene.world();

    let goal_x = scene.level().goal_x - scroll.x;
    draw_line(goal_x, 0.0, goal_x, screen_height(), 4.0, GOAL);

    for (index, body) in world.bodies.iter() {
        let Some(entity) = world.entity_at(index) else {
            continue;
        };
        let Some(kind) = world.kind(entity) else {
            continue;
        };
        if kind == Kind::Player || (!body.enabled && kind.is_pickup()) {
            continue;
        }

        let r = sprite_rect(body, scroll.x, scroll.y);
        match kind {
            Kind::Platform => draw_rectangle(r.x, r.y, r.w, r.h, GROUND),
            Kind::Pad => {
                let tinted = world.pads.get(entity).is_some_and(|p| p.tinted);
                draw_rectangle(r.x, r.y, r.w, r.h, if tinted { PAD_COOLDOWN } else { PAD });
            }
            Kind::Coin => draw_circle(r.x + r.w * 0.5, r.y + r.h * 0.5, r.w * 0.5, COIN),
            Kind::Ring => draw_circle_lines(r.x + r.w * 0.5, r.y + r.h * 0.5, r.w * 0.5, 5.0, RING),
            Kind::Spike => draw_triangle(
                vec2(r.x, r.y + r.h),
                vec2(r.x + r.w, r.y + r.h),
                vec2(r.x + r.w * 0.5, r.y),
                SPIKE,
            ),
            Kind::SmasherPiece => draw_rectangle(r.x, r.y, r.w, r.h, SMASHER),
            Kind::Crawler => draw_rectangle(r.x, r.y, r.w, r.h, CRAWLER),
            Kind::Flyer => draw_rectangle(r.x, r.y, r.w, r.h, FLYER),
            Kind::Player => {}
        }
    }

    if let (Some(body), Some(controller)) = (scene.player_body(), scene.controller()) {
        let r = sprite_rect(body, scroll.x, scroll.y);
        let phase = controller.phase(body);
        let color = if controller.tinted || phase == PlayerPhase::Dying {
            PLAYER_DYING
        } else if controller.boost_hair_ms() > 0.0 || controller.pose() == PlayerPose::AirBoost {
            PLAYER_BOOST
        } else {
            PLAYER
        };
        // Stretch a little while airborne
        let (w, h) = match phase {
            PlayerPhase::Airborne => (r.w * 0.9, r.h * 1.05),
            PlayerPhase::Grounded | PlayerPhase::Dying => (r.w, r.h),
        };
        draw_rectangle(r.x + (r.w - w) * 0.5, r.y + (r.h - h), w, h, color);
    }

    for slot in scene.floating_texts().active() {
        let color = Color::new(1.0, 1.0, 1.0, slot.alpha);
        let size = 28.0;
        let dims = measure_text(&slot.text, None, size as u16, 1.0);
        draw_text(
            &slot.text,
            slot.x - scroll.x - dims.width * 0.5,
            slot.y - scroll.y,
            size,
            color,
        );
    }
}

pub fn draw_hud(hud: &Hud) {
    draw_text(&format!("COINS {}", hud.coins_text), 20.0, 40.0, 32.0, WHITE);

    let size = 32.0 * hud.pulse_scale();
    draw_text(&hud.multiplier_text, 20.0, 80.0, size, YELLOW);

    let dims = measure_text(&hud.progress_text, None, 32, 1.0);
    draw_text(&hud.progress_text, screen_width() - dims.width - 20.0, 40.0, 32.0, WHITE);
}

/// Shown after the goal is reached
pub fn draw_menu(coins: u32, multiplier: f32) {
    clear_background(Color::new(0.08, 0.08, 0.12, 1.0));

    let lines = [
        ("LEVEL COMPLETE".to_string(), 56.0, WHITE),
        (format!("{} coins at x{:.1}", coins, multiplier), 32.0, YELLOW),
        ("SPACE or click to run again".to_string(), 24.0, GRAY),
    ];

    let mut y = screen_height() * 0.4;
    for (text, size, color) in lines {
        let dims = measure_text(&text, None, size as u16, 1.0);
        draw_text(&text, (screen_width() - dims.width) * 0.5, y, size, color);
        y += size + 16.0;
    }
}
