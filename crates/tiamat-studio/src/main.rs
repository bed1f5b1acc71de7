use anyhow::Context;
use log::{info, warn};

use tiamat_engine::coords::{Color, Rect, Vec2};
use tiamat_engine::input::PointerInput;
use tiamat_engine::logging::{init_logging, LoggingConfig};
use tiamat_engine::scene::{
    Behavior, BehaviorCtx, PointerBlockable, QueueType, Renderable, Scene, SceneConfig, Stage,
};
use tiamat_engine::surface::{DrawList, Primitive, Surface};

// ── behaviors ────────────────────────────────────────────────────────────────

/// A hoverable world-space panel.
struct Panel {
    rect: Rect,
    color: Color,
    label: &'static str,
    hovered: bool,
}

impl Panel {
    fn new(label: &'static str, rect: Rect, color: Color) -> Self {
        Self { rect, color, label, hovered: false }
    }

    fn register(&self, ctx: &mut BehaviorCtx<'_>) {
        if let Err(err) = ctx.queue_pointer() {
            warn!("panel '{}' not hoverable this frame: {err}", self.label);
        }
    }
}

impl Behavior for Panel {
    fn start(&mut self, ctx: &mut BehaviorCtx<'_>) {
        self.register(ctx);
    }

    fn update(&mut self, ctx: &mut BehaviorCtx<'_>) {
        self.hovered = ctx.is_hovered();
        self.register(ctx);
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }

    fn as_pointer_blockable(&self) -> Option<&dyn PointerBlockable> {
        Some(self)
    }
}

impl Renderable for Panel {
    fn on_render(&mut self, surface: &mut dyn Surface) {
        let fill = if self.hovered { self.color.with_alpha(1.0) } else { self.color };
        surface.draw(Primitive::rect(self.rect, fill));
        surface.draw(Primitive::text(self.label, self.rect.center(), 14.0, Color::white()));
    }
}

impl PointerBlockable for Panel {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Screen-space status line.
#[derive(Default)]
struct Hud {
    frame: u64,
    dt_ms: f32,
}

impl Behavior for Hud {
    fn update(&mut self, ctx: &mut BehaviorCtx<'_>) {
        let time = ctx.time();
        self.frame = time.frame_index;
        self.dt_ms = time.dt * 1000.0;
    }

    fn depth_offset(&self) -> i32 {
        100
    }

    fn queue_type(&self) -> QueueType {
        QueueType::Overlay
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Renderable for Hud {
    fn on_render(&mut self, surface: &mut dyn Surface) {
        let line = format!("frame {:>3}  dt {:>6.2} ms", self.frame, self.dt_ms);
        surface.draw(Primitive::text(line, Vec2::new(8.0, 8.0), 12.0, Color::white()));
    }
}

/// Switches itself off after a few updates; the host turns it back on.
struct Beacon {
    updates: u32,
    period: u32,
}

impl Behavior for Beacon {
    fn update(&mut self, ctx: &mut BehaviorCtx<'_>) {
        self.updates += 1;
        if self.updates % self.period == 0 {
            info!("beacon going dark after {} updates", self.updates);
            ctx.set_enabled(false);
        }
    }

    fn resume(&mut self, _ctx: &mut BehaviorCtx<'_>) {
        info!("beacon back online");
    }
}

/// Removes its own node once its fuse runs out.
struct Fuse {
    frames_left: u32,
}

impl Behavior for Fuse {
    fn update(&mut self, ctx: &mut BehaviorCtx<'_>) {
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            if let Err(err) = ctx.destroy_node() {
                warn!("fuse could not remove its node: {err}");
            }
        }
    }

    fn on_destroy(&mut self, ctx: &mut BehaviorCtx<'_>) {
        let name = ctx.scene().node(ctx.node_id()).map(|n| n.name().to_owned()).unwrap_or_default();
        info!("'{name}' burned out");
    }
}

// ── scene setup ──────────────────────────────────────────────────────────────

fn build_control_room() -> anyhow::Result<Scene> {
    let mut scene = Scene::new(
        SceneConfig::named("control-room").with_clear_color(Color::from_rgba8(16, 18, 24, 255)),
    );

    let deck = scene.create_node("Deck");
    let back = scene.create_child(deck, "Panel")?;
    let front = scene.create_child(deck, "Panel")?;
    scene.set_depth(back, 0)?;
    scene.set_depth(front, 10)?;
    scene.add_behavior(back, Panel::new("telemetry", Rect::new(100.0, 100.0, 300.0, 200.0), Color::new(0.2, 0.4, 0.8, 0.7)))?;
    scene.add_behavior(front, Panel::new("alerts", Rect::new(250.0, 150.0, 200.0, 150.0), Color::new(0.8, 0.3, 0.2, 0.7)))?;

    let beacon = scene.create_child(deck, "Beacon")?;
    scene.add_behavior(beacon, Beacon { updates: 0, period: 3 })?;

    let flare = scene.create_node("Flare");
    scene.add_behavior(flare, Fuse { frames_left: 4 })?;
    scene.add_behavior(flare, Panel::new("flare", Rect::new(600.0, 400.0, 40.0, 40.0), Color::new(1.0, 0.9, 0.2, 0.8)))?;

    let hud = scene.create_node("Hud");
    scene.add_behavior(hud, Hud::default())?;

    Ok(scene)
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default().with_filter("info,tiamat_engine=debug"));

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║        TIAMAT SCENE STUDIO v0.1        ║");
    println!("  ║   depth-ordered draws · hover picking  ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let mut stage = Stage::new();
    stage.insert(build_control_room()?)?;
    stage.activate("control-room")?;

    // Cursor path: over the back panel, onto the overlap, off-window.
    let script = [
        PointerInput::at(120.0, 120.0),
        PointerInput::at(120.0, 120.0),
        PointerInput::at(300.0, 200.0),
        PointerInput::at(300.0, 200.0),
        PointerInput::at(610.0, 410.0),
        PointerInput::outside(),
        PointerInput::at(420.0, 280.0),
        PointerInput::at(420.0, 280.0),
    ];

    let mut list = DrawList::new();
    for (i, cursor) in script.iter().enumerate() {
        let stats = stage.update(cursor);
        let draws = stage.render(&mut list);

        let scene = stage.active_mut().context("no active scene")?;
        let hovered = scene
            .hovered_node()
            .and_then(|id| scene.node(id))
            .map(|n| n.name().to_owned())
            .unwrap_or_else(|| "-".to_owned());
        info!(
            "frame {i}: started {} updated {} swept {} | hover {hovered} | world {} overlay {} ({} primitives)",
            stats.started,
            stats.updated,
            stats.swept,
            draws.world,
            draws.overlay,
            list.len()
        );

        // Bring the beacon back whenever it has switched itself off.
        let beacon = scene.find("Beacon").and_then(|node| scene.find_behavior::<Beacon>(node));
        if let Some(beacon) = beacon.filter(|&id| scene.is_behavior_enabled(id) == Some(false)) {
            scene.set_behavior_enabled(beacon, true)?;
        }
    }

    let scene = stage.active().context("no active scene")?;
    info!("done: {} nodes left in '{}'", scene.node_count(), scene.name());
    for item in list.items() {
        info!("  #{:<2} {:<6} view x{:.1}", item.seq, item.primitive.kind(), item.view.scale);
    }

    stage.deactivate();
    Ok(())
}
