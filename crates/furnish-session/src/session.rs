//! The owned editing session

use crate::drag::DragState;
use crate::event::{EventBus, SessionEvent};
use crate::history::{History, UndoOutcome};
use crate::selection::Selection;
use furnish_analysis::{AccessibilityReport, Scorer};
use furnish_asset::{AssetState, AssetTracker, DeferredBatch, DeferredOrigin, DeferredQueue};
use furnish_constraint::{
    collides, obstacles_from, Constrained, ContainmentEvaluator, Solver, ValidationReport,
};
use furnish_core::{
    normalize_angle, Catalog, EngineConfig, FurnishError, FurnitureTypeId, InstanceId, Placement,
    Result, RoomId, RoomSpec, Vec2,
};
use furnish_layout::{expand_preset, LayoutFailure, LayoutGenerator, LayoutRequest};
use furnish_registry::{PlacedInstance, Registry};
use furnish_scene::{
    load_plan, load_plan_string, registry_to_plan, ParsedPlan, PlanFile, PlanFormat, SkippedEntry,
};
use std::f32::consts::FRAC_PI_4;
use std::path::Path;

/// What applying a plan did
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// The room the plan ended up in
    pub room: RoomId,
    /// The document's room id, when it is not in the catalog
    pub unknown_room: Option<RoomId>,
    pub placed: usize,
    /// Items waiting on their furniture type's payload
    pub deferred: usize,
    pub skipped: Vec<SkippedEntry>,
}

enum Disposition {
    Placed,
    Deferred,
    Skipped(String),
}

/// One interactive layout session for one room at a time
///
/// All mutation goes through this type. Every mutating operation pushes a
/// registry snapshot onto the history before it changes anything.
pub struct Session {
    catalog: Catalog,
    config: EngineConfig,
    room: RoomSpec,
    registry: Registry,
    history: History,
    solver: Solver,
    generator: LayoutGenerator,
    scorer: Scorer,
    assets: AssetTracker,
    deferred: DeferredQueue,
    selection: Selection,
    drag: DragState,
    events: EventBus,
    seat_total: u32,
    /// Cached until the next change
    report: Option<AccessibilityReport>,
}

impl Session {
    /// Start a session in the catalog's default room
    pub fn new(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        let room_id = catalog.default_room().clone();
        Self::with_room(catalog, config, &room_id)
    }

    /// Start a session in a specific room
    pub fn with_room(catalog: Catalog, config: EngineConfig, room_id: &RoomId) -> Result<Self> {
        let room = catalog.room(room_id)?.clone();
        let solver = Solver::new(config.solver.clone());

        Ok(Self {
            generator: LayoutGenerator::new(config.wizard.clone(), solver.clone()),
            scorer: Scorer::new(config.scoring.clone()),
            history: History::new(config.history_capacity),
            solver,
            room,
            catalog,
            config,
            registry: Registry::new(),
            assets: AssetTracker::new(),
            deferred: DeferredQueue::new(),
            selection: Selection::new(),
            drag: DragState::Idle,
            events: EventBus::new(),
            seat_total: 0,
            report: None,
        })
    }

    /// Use an asset tracker fed by an external loader
    pub fn with_assets(mut self, assets: AssetTracker) -> Self {
        self.assets = assets;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn room(&self) -> &RoomSpec {
        &self.room
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current instances in insertion order, for rendering
    pub fn instances(&self) -> Vec<PlacedInstance> {
        self.registry.list()
    }

    /// Sum of seats over all placed instances
    pub fn seat_total(&self) -> u32 {
        self.seat_total
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    pub fn asset_state(&self, type_id: FurnitureTypeId) -> AssetState {
        self.assets.state(type_id)
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    // --- Room ---

    /// Switch rooms. Instances, history and deferred placements are dropped.
    pub fn switch_room(&mut self, room_id: &RoomId) -> Result<()> {
        let room = self.catalog.room(room_id)?.clone();

        self.release_all();
        self.history.clear();
        let dropped = self.deferred.clear();
        if dropped > 0 {
            tracing::debug!("dropped {} deferred placement(s) on room switch", dropped);
        }

        self.room = room;
        tracing::info!("switched to room '{}'", self.room.id);
        self.events.push(SessionEvent::RoomChanged {
            room: self.room.id.clone(),
        });
        self.changed();
        Ok(())
    }

    // --- Placement ---

    /// Add one instance of a type at the room centre and select it.
    ///
    /// Returns `None` when the type's payload is not available yet (the
    /// placement is deferred) or failed to load.
    pub fn add_furniture(&mut self, type_id: FurnitureTypeId) -> Result<Option<InstanceId>> {
        let kind = self.catalog.furniture(type_id)?;
        let name = kind.name.clone();
        let fitted = self
            .solver
            .constrain(kind, &self.room, Vec2::ZERO, 0.0, &[], false);
        let placement = Placement::new(type_id, fitted.position, fitted.rotation);

        match self.assets.state(type_id) {
            AssetState::Ready => {}
            AssetState::Pending => {
                self.deferred.push(DeferredBatch {
                    type_id,
                    placements: vec![placement],
                    origin: DeferredOrigin::Fresh,
                });
                self.notice(format!("{} is still loading and will be placed when ready", name));
                return Ok(None);
            }
            AssetState::Failed(reason) => {
                self.notice(format!("{} is unavailable: {}", name, reason));
                return Ok(None);
            }
        }

        self.record();
        let id = self.instantiate(&placement);
        if let Some(id) = id {
            self.selection.select(id);
            self.emit_selection();
        }
        self.changed();
        Ok(id)
    }

    /// Replace an instance's annotation
    pub fn set_annotation(&mut self, id: InstanceId, annotation: Option<String>) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(FurnishError::InstanceNotFound(id.to_string()));
        }
        self.record();
        self.registry.set_annotation(id, annotation)
    }

    /// Topmost instance whose collision circle contains `point`
    pub fn hit_test(&self, point: Vec2) -> Option<InstanceId> {
        self.registry
            .list()
            .into_iter()
            .rev()
            .find(|instance| {
                self.catalog
                    .furniture(instance.type_id)
                    .map(|kind| instance.position.distance(&point) <= kind.radius)
                    .unwrap_or(false)
            })
            .map(|instance| instance.id)
    }

    // --- Selection ---

    pub fn select(&mut self, id: InstanceId) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(FurnishError::InstanceNotFound(id.to_string()));
        }
        self.selection.select(id);
        self.emit_selection();
        Ok(())
    }

    /// Add an instance to the selection, or remove it if already selected
    pub fn toggle_selection(&mut self, id: InstanceId) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(FurnishError::InstanceNotFound(id.to_string()));
        }
        self.selection.toggle(id);
        self.emit_selection();
        Ok(())
    }

    pub fn deselect(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.emit_selection();
        }
    }

    /// Rotate selected floor items by `steps` eighth turns. Returns the count rotated.
    pub fn rotate_selection(&mut self, steps: i32) -> usize {
        let targets: Vec<PlacedInstance> = self
            .selection
            .ids()
            .into_iter()
            .filter_map(|id| self.registry.get(id))
            .filter(|instance| !instance.wall_item)
            .collect();
        if targets.is_empty() || steps == 0 {
            return 0;
        }

        self.record();
        let delta = FRAC_PI_4 * steps as f32;
        for instance in &targets {
            let rotation = normalize_angle(instance.rotation + delta);
            if self
                .registry
                .set_transform(instance.id, instance.position, rotation)
                .is_ok()
            {
                let colliding = self.colliding(instance, instance.position);
                self.events.push(SessionEvent::InstanceMoved {
                    id: instance.id,
                    position: instance.position,
                    rotation,
                    colliding,
                });
            }
        }
        self.changed();
        targets.len()
    }

    /// Delete every selected instance. Returns the count removed.
    pub fn delete_selection(&mut self) -> usize {
        let ids: Vec<InstanceId> = self
            .selection
            .ids()
            .into_iter()
            .filter(|id| self.registry.contains(*id))
            .collect();
        if ids.is_empty() {
            return 0;
        }

        self.record();
        if self.drag.target().is_some_and(|target| ids.contains(&target)) {
            self.drag = DragState::Idle;
        }
        for id in &ids {
            if self.registry.remove(*id).is_ok() {
                self.events.push(SessionEvent::InstanceRemoved { id: *id });
            }
        }
        self.selection.retain(|id| !ids.contains(&id));
        self.emit_selection();
        self.changed();
        ids.len()
    }

    /// Remove every instance from the room. Returns the count removed.
    pub fn clear_room(&mut self) -> usize {
        self.deferred.clear();
        if self.registry.is_empty() {
            self.deselect();
            return 0;
        }

        self.record();
        let count = self.registry.len();
        self.release_all();
        self.changed();
        count
    }

    // --- Wizard and presets ---

    /// Replace the layout with a generated batch.
    ///
    /// On failure the registry and history are untouched and a
    /// [`SessionEvent::LayoutFailed`] is emitted. When the type's payload is
    /// still loading the whole batch is deferred and no ids are returned.
    pub fn apply_wizard(
        &mut self,
        request: &LayoutRequest,
    ) -> std::result::Result<Vec<InstanceId>, LayoutFailure> {
        let outcome = self.try_wizard(request);
        if let Err(failure) = &outcome {
            self.events.push(SessionEvent::LayoutFailed(failure.clone()));
        }
        outcome
    }

    fn try_wizard(
        &mut self,
        request: &LayoutRequest,
    ) -> std::result::Result<Vec<InstanceId>, LayoutFailure> {
        let type_id = self.generator.resolve_type(&self.catalog, request)?.id;
        let state = self.assets.state(type_id);
        if let AssetState::Failed(_) = state {
            return Err(LayoutFailure::AssetUnavailable(type_id));
        }

        let batch = self.generator.generate(&self.catalog, &self.room, request)?;
        if state == AssetState::Pending {
            self.deferred.push(DeferredBatch {
                type_id,
                placements: batch,
                origin: DeferredOrigin::Replace,
            });
            self.notice(format!(
                "{} layout will be placed when furniture type {} has loaded",
                request.scenario, type_id
            ));
            return Ok(Vec::new());
        }

        Ok(self.replace_layout(&batch))
    }

    /// Replace the layout with a named catalog preset. Returns the count placed.
    pub fn load_preset(&mut self, name: &str) -> Result<usize> {
        let preset = self.catalog.preset(name)?;
        let placements = expand_preset(
            preset,
            &self.catalog,
            &self.room,
            &self.solver,
            self.config.wizard.preset_inset,
        );

        self.record();
        self.replace_all();
        let mut placed = 0;
        for placement in placements {
            if let Disposition::Placed = self.restore_one(placement) {
                placed += 1;
            }
        }
        self.changed();
        Ok(placed)
    }

    fn replace_layout(&mut self, batch: &[Placement]) -> Vec<InstanceId> {
        self.record();
        self.replace_all();
        let ids = batch
            .iter()
            .filter_map(|placement| self.instantiate(placement))
            .collect();
        self.changed();
        ids
    }

    // --- Pointer drag ---

    /// Pointer pressed at `point`; `hit` is the instance under the pointer.
    ///
    /// Over an instance this selects it and starts a drag (one history
    /// snapshot per drag). Over empty floor it clears the selection.
    pub fn pointer_down(&mut self, point: Vec2, hit: Option<InstanceId>) -> bool {
        let Some(instance) = hit.and_then(|id| self.registry.get(id)) else {
            self.deselect();
            return false;
        };

        if self.selection.contains(instance.id) {
            self.selection.promote(instance.id);
        } else {
            self.selection.select(instance.id);
        }
        self.emit_selection();

        self.record();
        self.drag = DragState::begin(instance.id, point, instance.position);
        true
    }

    /// Pointer moved while dragging: constrain and apply the new position
    pub fn pointer_move(&mut self, point: Vec2) -> Option<Constrained> {
        let target = self.drag.target()?;
        let candidate = self.drag.candidate(point)?;
        let Some(instance) = self.registry.get(target) else {
            self.drag = DragState::Idle;
            return None;
        };

        let kind = self.catalog.furniture(instance.type_id).ok()?;
        let obstacles = obstacles_from(&self.registry, &self.catalog, Some(target));
        let constrained = self.solver.constrain(
            kind,
            &self.room,
            candidate,
            instance.rotation,
            &obstacles,
            true,
        );

        self.registry
            .set_transform(target, constrained.position, constrained.rotation)
            .ok()?;
        self.events.push(SessionEvent::InstanceMoved {
            id: target,
            position: constrained.position,
            rotation: constrained.rotation,
            colliding: constrained.colliding,
        });
        self.report = None;
        Some(constrained)
    }

    /// Pointer released: the last constrained position stays committed
    pub fn pointer_up(&mut self) -> Option<InstanceId> {
        let target = self.drag.target();
        self.drag = DragState::Idle;
        target
    }

    // --- History ---

    /// Restore the most recent snapshot.
    ///
    /// Types whose payload is not ready are skipped. On an empty history
    /// this is a no-op that emits a notice.
    pub fn undo(&mut self) -> UndoOutcome {
        self.drag = DragState::Idle;
        let Some(snapshot) = self.history.pop() else {
            self.notice("Nothing to undo");
            return UndoOutcome::Empty;
        };

        self.replace_all();
        let mut restored = 0;
        let mut skipped = 0;
        for placement in &snapshot {
            if !self.assets.is_ready(placement.type_id) {
                tracing::warn!(
                    "undo skipped furniture type {}: payload not ready",
                    placement.type_id
                );
                skipped += 1;
                continue;
            }
            match self.instantiate(placement) {
                Some(_) => restored += 1,
                None => skipped += 1,
            }
        }
        self.changed();
        UndoOutcome::Restored { restored, skipped }
    }

    // --- Assets ---

    /// A type's payload became available; place everything waiting on it.
    /// Returns the count placed.
    pub fn asset_ready(&mut self, type_id: FurnitureTypeId) -> usize {
        self.assets.mark_ready(type_id);

        let mut placed = 0;
        for batch in self.deferred.take(type_id) {
            match batch.origin {
                DeferredOrigin::Restore => {
                    for placement in &batch.placements {
                        if self.instantiate(placement).is_some() {
                            placed += 1;
                        }
                    }
                }
                DeferredOrigin::Fresh => {
                    self.record();
                    for placement in &batch.placements {
                        if let Some(id) = self.instantiate(placement) {
                            placed += 1;
                            self.selection.select(id);
                            self.emit_selection();
                        }
                    }
                }
                DeferredOrigin::Replace => {
                    placed += self.replace_layout(&batch.placements).len();
                }
            }
        }

        if placed > 0 {
            self.changed();
        }
        placed
    }

    /// A type's payload will never arrive; drop what waits on it.
    /// Returns the count dropped.
    pub fn asset_failed(&mut self, type_id: FurnitureTypeId, reason: &str) -> usize {
        self.assets.mark_failed(type_id, reason);
        let dropped = self.deferred.discard(type_id);
        if dropped > 0 {
            self.notice(format!(
                "{} placement(s) of furniture type {} dropped: {}",
                dropped, type_id, reason
            ));
        }
        dropped
    }

    // --- Plans ---

    /// The current layout as a serializable plan
    pub fn plan(&self) -> PlanFile {
        registry_to_plan(&self.registry, &self.room.id)
    }

    /// Save the current layout; the format follows the file extension
    pub fn save_plan<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        furnish_scene::save_plan(path, &self.plan())
    }

    /// Load a plan file, replacing the current layout
    pub fn load_plan<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadSummary> {
        Ok(self.apply_plan(load_plan(path)?))
    }

    /// Load a plan document, replacing the current layout
    pub fn load_plan_str(&mut self, content: &str, format: PlanFormat) -> Result<LoadSummary> {
        Ok(self.apply_plan(load_plan_string(content, format)?))
    }

    /// Apply a parsed plan.
    ///
    /// A known room other than the current one triggers a room switch; an
    /// unknown room falls back to the current room. Unknown types and
    /// failed payloads are skipped, pending payloads deferred.
    pub fn apply_plan(&mut self, mut plan: ParsedPlan) -> LoadSummary {
        plan.retain_known(&self.catalog);

        let mut unknown_room = None;
        let target = match plan.room_id.take() {
            Some(id) if self.catalog.room(&id).is_ok() => Some(id),
            Some(id) => {
                tracing::warn!("plan room '{}' is unknown, using '{}'", id, self.room.id);
                unknown_room = Some(id);
                None
            }
            None => None,
        };

        match target {
            Some(id) if id != self.room.id => {
                if let Err(e) = self.switch_room(&id) {
                    tracing::warn!("plan room '{}' could not be entered: {}", id, e);
                }
            }
            _ => {
                self.record();
                self.replace_all();
            }
        }

        let mut placed = 0;
        let mut deferred = 0;
        let mut skipped = plan.skipped;
        for (index, item) in plan.items.into_iter().enumerate() {
            if !(item.x.is_finite() && item.z.is_finite() && item.rotation.is_finite()) {
                tracing::warn!("plan item {} skipped: non-finite coordinates", index);
                skipped.push(SkippedEntry {
                    index,
                    reason: "non-finite coordinates".to_string(),
                });
                continue;
            }
            let Some(fitted) = self.fit(&item) else {
                continue;
            };
            match self.restore_one(fitted) {
                Disposition::Placed => placed += 1,
                Disposition::Deferred => deferred += 1,
                Disposition::Skipped(reason) => skipped.push(SkippedEntry { index, reason }),
            }
        }
        self.changed();

        LoadSummary {
            room: self.room.id.clone(),
            unknown_room,
            placed,
            deferred,
            skipped,
        }
    }

    // --- Analysis ---

    /// The accessibility report for the current layout, cached until the next change
    pub fn report(&mut self) -> &AccessibilityReport {
        let (scorer, registry, catalog, room) =
            (&self.scorer, &self.registry, &self.catalog, &self.room);
        self.report
            .get_or_insert_with(|| scorer.score(registry, catalog, room))
    }

    /// Containment and collision check of the current layout
    pub fn validate(&self) -> ValidationReport {
        ContainmentEvaluator::new(&self.registry, &self.catalog, &self.room, &self.solver)
            .validate(self.config.wizard.tolerance)
    }

    // --- Internals ---

    fn record(&mut self) {
        self.history.push(self.registry.snapshot());
    }

    fn changed(&mut self) {
        self.seat_total = self
            .registry
            .list()
            .iter()
            .filter_map(|instance| self.catalog.furniture(instance.type_id).ok())
            .map(|kind| kind.seats)
            .sum();
        self.report = None;
    }

    fn notice(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.events.push(SessionEvent::Notice(message));
    }

    fn emit_selection(&mut self) {
        self.events.push(SessionEvent::SelectionChanged {
            primary: self.selection.primary(),
            selected: self.selection.ids(),
        });
    }

    /// Clear the registry, telling collaborators to release each instance
    fn release_all(&mut self) {
        for id in self.registry.clear() {
            self.events.push(SessionEvent::InstanceRemoved { id });
        }
        self.drag = DragState::Idle;
        self.deselect();
    }

    /// Clear the layout and drop placements still waiting on a payload
    fn replace_all(&mut self) {
        self.release_all();
        let dropped = self.deferred.clear();
        if dropped > 0 {
            tracing::debug!("dropped {} deferred placement(s) with the old layout", dropped);
        }
    }

    fn instantiate(&mut self, placement: &Placement) -> Option<InstanceId> {
        let kind = match self.catalog.furniture(placement.type_id) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!("cannot place item: {}", e);
                return None;
            }
        };
        let id = self.registry.restore(kind, placement);
        self.events.push(SessionEvent::InstanceAdded {
            id,
            type_id: placement.type_id,
        });
        Some(id)
    }

    /// Run a stored placement through containment only (no grid snap)
    fn fit(&self, placement: &Placement) -> Option<Placement> {
        let kind = self.catalog.furniture(placement.type_id).ok()?;
        let fitted = self.solver.constrain(
            kind,
            &self.room,
            placement.position(),
            placement.rotation,
            &[],
            false,
        );
        Some(Placement {
            type_id: placement.type_id,
            x: fitted.position.x,
            z: fitted.position.z,
            rotation: fitted.rotation,
            annotation: placement.annotation.clone(),
        })
    }

    fn restore_one(&mut self, placement: Placement) -> Disposition {
        match self.assets.state(placement.type_id) {
            AssetState::Ready => match self.instantiate(&placement) {
                Some(_) => Disposition::Placed,
                None => Disposition::Skipped(format!(
                    "furniture type {} could not be placed",
                    placement.type_id
                )),
            },
            AssetState::Pending => {
                self.deferred.push_restore(placement);
                Disposition::Deferred
            }
            AssetState::Failed(reason) => {
                tracing::warn!(
                    "skipped furniture type {}: payload failed ({})",
                    placement.type_id,
                    reason
                );
                Disposition::Skipped(format!(
                    "furniture type {} failed to load: {}",
                    placement.type_id, reason
                ))
            }
        }
    }

    fn colliding(&self, instance: &PlacedInstance, position: Vec2) -> bool {
        let Ok(kind) = self.catalog.furniture(instance.type_id) else {
            return false;
        };
        if kind.wall_item {
            return false;
        }
        obstacles_from(&self.registry, &self.catalog, Some(instance.id))
            .iter()
            .any(|other| {
                collides(
                    position,
                    kind.radius,
                    other.position,
                    other.radius,
                    self.config.solver.collision_factor,
                )
            })
    }
}
