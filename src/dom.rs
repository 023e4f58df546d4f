//! Browser side of the mini-game: finds the page elements, forwards keyboard
//! and resize events into the `GameSession`, drives it from
//! `requestAnimationFrame`, and writes each `Snapshot` back to the DOM.
//!
//! Page contract (all looked up once at bind time):
//! - `.game-character`   positioned wrapper, receives `left` / `bottom` / facing
//! - `.character-sprite` receives the `running` / `jumping` classes
//! - `.collectible`      zero or more coins, marked `collected` when picked up
//! - `#score`, `#level`  text displays
//! - `.pixel-text`       optional start prompt, hidden once the game starts

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window, window};

use crate::error::InitError;
use crate::game::{
    EffectKind, Facing, GameConfig, GameEvent, GameSession, LogicalKey, Rect, Snapshot, Viewport,
};

const CHARACTER_SEL: &str = ".game-character";
const SPRITE_SEL: &str = ".character-sprite";
const COLLECTIBLE_SEL: &str = ".collectible";
const SCORE_SEL: &str = "#score";
const LEVEL_SEL: &str = "#level";
const PROMPT_SEL: &str = ".pixel-text";

// --- Bound state -------------------------------------------------------------

struct Targets {
    character: HtmlElement,
    sprite: Element,
    score: Element,
    level: Element,
    prompt: Option<HtmlElement>,
    collectibles: Vec<Element>,
}

impl Targets {
    /// Resolve every element the game writes to. Any required one missing is fatal.
    fn locate(doc: &Document) -> Result<Self, InitError> {
        let required = |sel: &'static str| -> Result<Element, InitError> {
            doc.query_selector(sel)?.ok_or(InitError::MissingElement(sel))
        };
        let character: HtmlElement = required(CHARACTER_SEL)?
            .dyn_into()
            .map_err(|_| InitError::Dom(format!("`{CHARACTER_SEL}` is not an HTML element")))?;
        let sprite = required(SPRITE_SEL)?;
        let score = required(SCORE_SEL)?;
        let level = required(LEVEL_SEL)?;
        let prompt = doc
            .query_selector(PROMPT_SEL)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let nodes = doc.query_selector_all(COLLECTIBLE_SEL)?;
        let collectibles: Vec<Element> = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .collect();

        Ok(Self { character, sprite, score, level, prompt, collectibles })
    }

    fn hide_prompt(&self) {
        if let Some(prompt) = &self.prompt {
            warn_on_err(prompt.style().set_property("display", "none"), "hide start prompt");
        }
    }
}

struct BoundGame {
    session: GameSession,
    targets: Targets,
    document: Document,
    effect_nodes: HashMap<u64, Element>,
}

thread_local! {
    static GAME: RefCell<Option<BoundGame>> = RefCell::new(None);
}

// --- Binding -----------------------------------------------------------------

/// Wire the mini-game into the current page. Nothing is registered unless every
/// required element is present.
pub(crate) fn bind(config: GameConfig) -> Result<(), InitError> {
    if GAME.with(|cell| cell.borrow().is_some()) {
        log::warn!("mini-game already bound; ignoring second start");
        return Ok(());
    }
    config.validate().map_err(InitError::InvalidConfig)?;

    let win = window().ok_or(InitError::NoWindow)?;
    let doc = win.document().ok_or(InitError::NoDocument)?;
    let targets = Targets::locate(&doc)?;
    if targets.collectibles.is_empty() {
        log::warn!("no `{COLLECTIBLE_SEL}` elements found; nothing to collect");
    }

    let sprite_size = (
        targets.character.offset_width() as f64,
        targets.character.offset_height() as f64,
    );
    let coin_bounds: Vec<Rect> = targets.collectibles.iter().map(measure).collect();
    let session = GameSession::new(config, viewport_of(&win), sprite_size, coin_bounds);

    install_listeners(&win, &doc)?;

    let mut bound = BoundGame {
        session,
        targets,
        document: doc,
        effect_nodes: HashMap::new(),
    };
    render(&mut bound);
    log::info!(
        "mini-game bound with {} collectibles",
        bound.targets.collectibles.len()
    );
    GAME.with(|cell| cell.replace(Some(bound)));
    Ok(())
}

/// Current (score, level); (0, 1) before the game is bound.
pub(crate) fn score_and_level() -> (u32, u32) {
    GAME.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or((0, 1), |g| (g.session.score(), g.session.level()))
    })
}

fn install_listeners(win: &Window, doc: &Document) -> Result<(), InitError> {
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            on_key(&evt.code(), true);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            on_key(&evt.code(), false);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Resize moves the resting line and the right edge.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            GAME.with(|cell| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    game.session.resize(viewport_of(&win));
                    remeasure_coins(game);
                    render(game);
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn on_key(code: &str, down: bool) {
    let Some(key) = LogicalKey::from_code(code) else {
        return;
    };
    let started = GAME.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(game) = slot.as_mut() else {
            return false;
        };
        let started = if down {
            game.session.press(key) == Some(GameEvent::Started)
        } else {
            game.session.release(key);
            false
        };
        if started {
            log::info!("{}", describe(GameEvent::Started));
            game.targets.hide_prompt();
        }
        render(game);
        started
    });
    if started {
        start_frame_loop();
    }
}

// --- Frame loop --------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Runs for the rest of the page's life once started; there is no stop.
fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow_mut().as_mut() {
                frame(game, ts);
            }
        });
        if let Some(cb) = f.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = g.borrow().as_ref() {
        request_frame(cb);
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) {
    if let Some(w) = window() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }
}

/// One frame: move, write the new position, then test pickups against the
/// live screen bounds of the sprite and every remaining coin. Measuring after
/// the write keeps page scroll and the sprite's real container in the picture.
fn frame(game: &mut BoundGame, ts: f64) {
    game.session.advance(ts);
    write_character(&game.targets, &game.session.snapshot());

    let hero = measure(&game.targets.character);
    remeasure_coins(game);
    let events = game.session.resolve_collisions(ts, hero);
    for event in &events {
        match event {
            GameEvent::Collected { .. } => log::debug!("{}", describe(*event)),
            _ => log::info!("{}", describe(*event)),
        }
    }

    write_hud(game);
}

fn remeasure_coins(game: &mut BoundGame) {
    let BoundGame { session, targets, .. } = game;
    for (i, el) in targets.collectibles.iter().enumerate() {
        if session.collectibles().get(i).is_some_and(|c| !c.is_collected()) {
            session.set_collectible_bounds(i, measure(el));
        }
    }
}

fn describe(event: GameEvent) -> String {
    match event {
        GameEvent::Started => "mini-game started".to_string(),
        GameEvent::Collected { index } => format!("collectible {index} picked up"),
        GameEvent::LevelUp { level } => format!("level up: {level}"),
    }
}

// --- Rendering ---------------------------------------------------------------

fn render(game: &mut BoundGame) {
    write_character(&game.targets, &game.session.snapshot());
    write_hud(game);
}

/// Score, level, coin states and effect nodes.
fn write_hud(game: &mut BoundGame) {
    let BoundGame { session, targets, document, effect_nodes } = game;
    let snap = session.snapshot();

    targets.score.set_text_content(Some(&snap.score.to_string()));
    targets.level.set_text_content(Some(&snap.level.to_string()));

    for (coin, el) in snap.collectibles.iter().zip(&targets.collectibles) {
        if coin.is_collected() {
            warn_on_err(el.class_list().add_1("collected"), "mark collectible");
        }
    }

    sync_effects(document, effect_nodes, &snap);
}

fn write_character(targets: &Targets, snap: &Snapshot<'_>) {
    let style = targets.character.style();
    warn_on_err(style.set_property("left", &format!("{}px", snap.x)), "character left");
    warn_on_err(style.set_property("bottom", &format!("{}px", snap.y)), "character bottom");
    let transform = match snap.facing {
        Facing::Left => "translateX(-50%) scaleX(-1)",
        Facing::Right => "translateX(-50%) scaleX(1)",
    };
    warn_on_err(style.set_property("transform", transform), "character facing");

    let classes = targets.sprite.class_list();
    if let Err(e) = classes.toggle_with_force("running", snap.running) {
        log::warn!("sprite running flag: {e:?}");
    }
    if let Err(e) = classes.toggle_with_force("jumping", snap.jumping) {
        log::warn!("sprite jumping flag: {e:?}");
    }
}

/// Create nodes for newly spawned effects and drop nodes whose effect expired.
fn sync_effects(doc: &Document, nodes: &mut HashMap<u64, Element>, snap: &Snapshot<'_>) {
    let live: HashSet<u64> = snap.effects.iter().map(|e| e.id).collect();
    nodes.retain(|id, el| {
        let keep = live.contains(id);
        if !keep {
            el.remove();
        }
        keep
    });

    let Some(body) = doc.body() else { return };
    for effect in snap.effects {
        if nodes.contains_key(&effect.id) {
            continue;
        }
        let el = match doc.create_element("div") {
            Ok(el) => el,
            Err(e) => {
                log::warn!("could not create effect node: {e:?}");
                continue;
            }
        };
        match effect.kind {
            EffectKind::Particle { .. } => el.set_class_name("particle"),
            EffectKind::LevelUpBanner => {
                el.set_class_name("level-up-text");
                el.set_text_content(Some("LEVEL UP!"));
            }
        }
        if let Some(style) = effect_style(&effect.kind) {
            warn_on_err(el.set_attribute("style", &style), "effect style");
        }
        if let Err(e) = body.append_child(&el) {
            log::warn!("could not attach effect node: {e:?}");
            continue;
        }
        nodes.insert(effect.id, el);
    }
}

/// Inline style for an effect node; banners are styled purely by class.
fn effect_style(kind: &EffectKind) -> Option<String> {
    match kind {
        EffectKind::Particle { x, y, angle_deg } => {
            Some(format!("left:{x}px; top:{y}px; --angle:{angle_deg}deg;"))
        }
        EffectKind::LevelUpBanner => None,
    }
}

// --- Helpers -----------------------------------------------------------------

fn viewport_of(win: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport {
        width: dim(win.inner_width()),
        height: dim(win.inner_height()),
    }
}

fn measure(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

fn warn_on_err(res: Result<(), JsValue>, what: &str) {
    if let Err(e) = res {
        log::warn!("{what}: {e:?}");
    }
}
