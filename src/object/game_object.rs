//! The game object: one card's identity, faces, ledgers and turn state.
//!
//! Every mutation takes the host's [`EngineHooks`]: replacement effects
//! get a say before counters, damage and untaps; triggers are raised for
//! what actually happened; and one "characteristics changed" notification
//! goes out per logical operation. Use [`GameObject::batch`] to fold
//! several mutations into a single notification.
//!
//! Queries recompute from scratch. Nothing here is cached.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::definition::{CardDefinition, CardId};
use super::face::FaceName;
use super::representation::Representation;
use super::store::RepresentationStore;
use crate::behavior::{
    expand, expand_intrinsic, retract, AbilityFactory, BehaviorId, CompiledBehavior,
    ConditionFacts, Origin,
};
use crate::characteristics::{ColorSet, TypeLine};
use crate::core::{ObjectId, PlayerId, RulesConfig, Timestamp};
use crate::counters::{CounterDelta, CounterLedger, CounterType, DamageLedger};
use crate::error::{CardError, Result};
use crate::hooks::{
    ChangeListener, ChangeSet, EngineHooks, ReplacementKind, ReplacementParams,
    ReplacementResult, StaticRules, TriggerKind, TriggerParams,
};
use crate::keywords::{Keyword, KeywordId, KeywordIdAllocator, KeywordInstance};
use crate::ledger::{ColorChange, KeywordChange, ModificationLedger, PtOverride, TimestampLog, TypeChange};

/// Links to other objects. Ids only; resolve them through an
/// [`ObjectRegistry`](super::ObjectRegistry).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    /// Objects currently copying this one.
    pub cloned_by: SmallVec<[ObjectId; 2]>,
    /// The object this one is copying.
    pub cloning: Option<ObjectId>,
    pub meld_partner: Option<ObjectId>,
    pub paired_with: Option<ObjectId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Batch {
    depth: u32,
    pending: ChangeSet,
}

/// A card in the game.
///
/// ```
/// use ccg_layers::characteristics::{PtValue, TypeLine};
/// use ccg_layers::core::{ObjectId, PlayerId, RulesConfig, Timestamp};
/// use ccg_layers::hooks::RecordingHooks;
/// use ccg_layers::keywords::Keyword;
/// use ccg_layers::object::{FaceName, GameObject, Representation};
///
/// let bear = Representation::new(FaceName::Original, "Grizzly Bears")
///     .with_types(TypeLine::parse("Creature — Bear"))
///     .with_pt(PtValue::Fixed(2), PtValue::Fixed(2));
/// let mut hooks = RecordingHooks::new();
/// let mut object = GameObject::new(ObjectId(1), PlayerId(0), bear, RulesConfig::default(), &mut hooks);
///
/// object.grant_keywords(Timestamp(4), [Keyword::Haste], &mut hooks);
/// assert!(object.has_keyword("Haste", &hooks));
///
/// object.remove_keyword_change(Timestamp(4), &mut hooks);
/// assert!(!object.has_keyword("Haste", &hooks));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    id: ObjectId,
    card: Option<CardId>,
    owner: PlayerId,
    controller: PlayerId,
    store: RepresentationStore,
    ledger: ModificationLedger,
    counters: CounterLedger,
    damage: DamageLedger,
    /// Additive power/toughness boosts ("gets +2/+2 until end of turn").
    boosts: TimestampLog<(i32, i32)>,
    sick: bool,
    tapped: bool,
    turned_face_up: bool,
    relations: Relations,
    keyword_ids: KeywordIdAllocator,
    config: RulesConfig,
    #[serde(skip)]
    batch: Batch,
}

impl GameObject {
    /// Create an object from its original representation and compile the
    /// printed keywords.
    pub fn new(
        id: ObjectId,
        owner: PlayerId,
        original: Representation,
        config: RulesConfig,
        factory: &mut dyn AbilityFactory,
    ) -> Self {
        let keyword_ids = original
            .keywords
            .iter()
            .map(|k| k.id)
            .max()
            .map_or_else(KeywordIdAllocator::new, KeywordIdAllocator::resume_after);
        let mut object = Self::bare(id, owner, RepresentationStore::new(original), config);
        object.keyword_ids = keyword_ids;
        expand_intrinsic(object.store.current_mut(), id, factory);
        object
    }

    /// Instantiate a card definition: every printed face is built and
    /// compiled now.
    pub fn from_definition(
        id: ObjectId,
        owner: PlayerId,
        definition: &CardDefinition,
        config: RulesConfig,
        factory: &mut dyn AbilityFactory,
    ) -> Result<Self> {
        definition.validate()?;
        let mut ids = KeywordIdAllocator::new();
        let mut faces = definition.faces.iter();
        let (_, original) = faces
            .next()
            .ok_or(CardError::UnknownRepresentation(FaceName::Original))?;
        let mut store = RepresentationStore::new(original.representation(
            FaceName::Original,
            &config.compiler,
            &mut ids,
        )?);
        for (name, face) in faces {
            store.add_alternate(*name, face.representation(*name, &config.compiler, &mut ids)?);
        }

        let mut object = Self::bare(id, owner, store, config);
        object.card = Some(definition.id);
        object.keyword_ids = ids;

        for (name, face) in &definition.faces {
            let rep = object
                .store
                .get_mut(*name)
                .ok_or(CardError::UnknownRepresentation(*name))?;
            for (n, recipe) in face.abilities.iter().enumerate() {
                let printed = u32::try_from(n).unwrap_or(u32::MAX);
                let handle = factory.build(id, recipe);
                rep.behaviors.attach(CompiledBehavior {
                    id: BehaviorId::new(Origin::Printed(printed), 0),
                    recipe: recipe.clone(),
                    host: id,
                    intrinsic: true,
                    handle,
                });
            }
            expand_intrinsic(rep, id, factory);
        }
        debug!(object = %id, card = %definition.id, faces = definition.faces.len(), "object instantiated");
        Ok(object)
    }

    fn bare(id: ObjectId, owner: PlayerId, store: RepresentationStore, config: RulesConfig) -> Self {
        Self {
            id,
            card: None,
            owner,
            controller: owner,
            store,
            ledger: ModificationLedger::new(),
            counters: CounterLedger::new(),
            damage: DamageLedger::new(),
            boosts: TimestampLog::new(),
            sick: false,
            tapped: false,
            turned_face_up: false,
            relations: Relations::default(),
            keyword_ids: KeywordIdAllocator::new(),
            config,
            batch: Batch::default(),
        }
    }

    // === Identity ===

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        self.card
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn controller(&self) -> PlayerId {
        self.controller
    }

    pub fn set_controller(&mut self, controller: PlayerId) {
        self.controller = controller;
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    pub fn relations_mut(&mut self) -> &mut Relations {
        &mut self.relations
    }

    /// Wrap a keyword in an instance with a fresh id from this object.
    pub fn keyword_instance(&mut self, keyword: Keyword) -> KeywordInstance {
        self.keyword_ids.instance(keyword)
    }

    // === Notification batching ===

    pub fn begin_batch(&mut self) {
        self.batch.depth += 1;
    }

    /// Close a batch. The outermost close sends the accumulated change
    /// set, if any.
    pub fn end_batch(&mut self, hooks: &mut impl ChangeListener) {
        if self.batch.depth == 0 {
            return;
        }
        self.batch.depth -= 1;
        if self.batch.depth == 0 {
            let pending = std::mem::replace(&mut self.batch.pending, ChangeSet::EMPTY);
            if !pending.is_empty() {
                hooks.characteristics_changed(self.id, pending);
            }
        }
    }

    /// Run `f` as one logical operation: at most one notification.
    pub fn batch<H: EngineHooks, R>(
        &mut self,
        hooks: &mut H,
        f: impl FnOnce(&mut Self, &mut H) -> R,
    ) -> R {
        self.begin_batch();
        let result = f(self, hooks);
        self.end_batch(hooks);
        result
    }

    fn notify(&mut self, hooks: &mut impl ChangeListener, changes: ChangeSet) {
        if changes.is_empty() {
            return;
        }
        if self.batch.depth > 0 {
            self.batch.pending |= changes;
        } else {
            hooks.characteristics_changed(self.id, changes);
        }
    }

    // === Faces ===

    #[must_use]
    pub fn face(&self) -> FaceName {
        self.store.current_name()
    }

    /// The current representation.
    #[must_use]
    pub fn representation(&self) -> &Representation {
        self.store.current()
    }

    #[must_use]
    pub fn store(&self) -> &RepresentationStore {
        &self.store
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.store.current().name
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face() == FaceName::FaceDown
    }

    /// Whether the object has been turned face up since it was last
    /// turned face down.
    #[must_use]
    pub fn was_turned_face_up(&self) -> bool {
        self.turned_face_up
    }

    /// Representation for `face`, synthesizing the face-down one on first
    /// request.
    pub fn get_or_create_face(
        &mut self,
        face: FaceName,
        exiled: bool,
        factory: &mut dyn AbilityFactory,
    ) -> Result<&Representation> {
        self.store.get_or_create(
            face,
            exiled,
            self.id,
            &self.config,
            &mut self.keyword_ids,
            factory,
        )
    }

    /// Make `face` current. `propagate` defaults to the configured value.
    ///
    /// With propagation, keyword behaviors are recompiled onto the new
    /// face, one notification is sent and a face-switched trigger raised.
    /// Returns false if `face` is already current or unknown.
    pub fn switch_face<H: EngineHooks>(
        &mut self,
        face: FaceName,
        propagate: Option<bool>,
        hooks: &mut H,
    ) -> bool {
        let from = self.store.current_name();
        if !self.store.switch_to(face, self.id) {
            return false;
        }
        if !propagate.unwrap_or(self.config.propagate_face_switch) {
            return true;
        }

        let granted: Vec<KeywordId> = self.ledger.granted_instances().map(|k| k.id).collect();
        if let Some(old) = self.store.get_mut(from) {
            for id in granted {
                retract(old, id, &mut *hooks);
            }
        }
        self.refresh_current_face(hooks);
        hooks.run_trigger(
            TriggerKind::FaceSwitched,
            TriggerParams::new(self.id).with_face(face),
            false,
        );
        true
    }

    /// Turn the object face down, synthesizing the face-down
    /// representation if needed. Returns false if it already was.
    pub fn turn_face_down<H: EngineHooks>(&mut self, exiled: bool, hooks: &mut H) -> Result<bool> {
        self.get_or_create_face(FaceName::FaceDown, exiled, &mut *hooks)?;
        let switched = self.switch_face(FaceName::FaceDown, Some(true), hooks);
        if switched {
            self.turned_face_up = false;
        }
        Ok(switched)
    }

    /// Turn a face-down object face up. Returns false if it was not face
    /// down.
    pub fn turn_face_up<H: EngineHooks>(&mut self, hooks: &mut H) -> bool {
        if !self.is_face_down() || !self.switch_face(FaceName::Original, Some(true), hooks) {
            return false;
        }
        self.turned_face_up = true;
        hooks.run_trigger(TriggerKind::TurnedFaceUp, TriggerParams::new(self.id), false);
        true
    }

    /// Exchange two representations (melding, flip effects).
    pub fn swap_faces(&mut self, a: FaceName, b: FaceName, hooks: &mut impl ChangeListener) -> bool {
        let swapped = self.store.swap(a, b);
        if swapped && (self.face() == a || self.face() == b) {
            self.notify(hooks, ChangeSet::FACE);
        }
        swapped
    }

    /// Install an alternate representation, compiling its printed
    /// keywords. Keyword ids are reallocated from this object.
    pub fn add_alternate(
        &mut self,
        face: FaceName,
        mut rep: Representation,
        factory: &mut dyn AbilityFactory,
    ) {
        for instance in &mut rep.keywords {
            instance.id = self.keyword_ids.allocate();
        }
        rep.face = face;
        expand_intrinsic(&mut rep, self.id, factory);
        if let Some(replaced) = self.store.add_alternate(face, rep) {
            for behavior in replaced.behaviors.iter() {
                factory.release(behavior.handle);
            }
        }
    }

    /// Remove a representation and release its behaviors. The original
    /// cannot be removed; removing the current one falls back to the
    /// original and recompiles keyword behaviors there.
    pub fn remove_face<H: EngineHooks>(&mut self, face: FaceName, hooks: &mut H) -> bool {
        let was_current = self.face() == face;
        let Some(removed) = self.store.remove(face) else {
            return false;
        };
        for behavior in removed.behaviors.iter() {
            hooks.release(behavior.handle);
        }
        if was_current {
            self.refresh_current_face(hooks);
        }
        true
    }

    /// Recompile keyword behaviors on a newly current face and send one
    /// notification for it.
    fn refresh_current_face<H: EngineHooks>(&mut self, hooks: &mut H) {
        self.batch(hooks, |object, hooks| {
            object.sync_keyword_behaviors(hooks);
            object.notify(hooks, ChangeSet::FACE_SWITCH);
        });
    }

    // === Modifications ===

    pub fn add_type_change(&mut self, ts: Timestamp, change: TypeChange, hooks: &mut impl ChangeListener) {
        self.ledger.add_type_change(ts, change);
        self.notify(hooks, ChangeSet::TYPE);
    }

    pub fn remove_type_change(&mut self, ts: Timestamp, hooks: &mut impl ChangeListener) -> bool {
        let removed = self.ledger.remove_type_change(ts).is_some();
        if removed {
            self.notify(hooks, ChangeSet::TYPE);
        }
        removed
    }

    pub fn add_color_change(&mut self, ts: Timestamp, change: ColorChange, hooks: &mut impl ChangeListener) {
        self.ledger.add_color_change(ts, change);
        self.notify(hooks, ChangeSet::COLOR);
    }

    /// Record a color change given by names ("red green"). Fails with
    /// `InvalidColor` without changing anything.
    pub fn add_color_names(
        &mut self,
        ts: Timestamp,
        names: &str,
        additive: bool,
        hooks: &mut impl ChangeListener,
    ) -> Result<()> {
        self.ledger.add_color_names(ts, names, additive)?;
        self.notify(hooks, ChangeSet::COLOR);
        Ok(())
    }

    pub fn remove_color_change(&mut self, ts: Timestamp, hooks: &mut impl ChangeListener) -> bool {
        let removed = self.ledger.remove_color_change(ts).is_some();
        if removed {
            self.notify(hooks, ChangeSet::COLOR);
        }
        removed
    }

    /// Record a keyword change and compile any granted keywords onto the
    /// current face.
    pub fn add_keyword_change<H: EngineHooks>(&mut self, ts: Timestamp, change: KeywordChange, hooks: &mut H) {
        self.ledger.add_keyword_change(ts, change);
        self.sync_keyword_behaviors(hooks);
        self.notify(hooks, ChangeSet::KEYWORDS);
    }

    /// Grant keywords at `ts`. Returns the new instances' ids.
    pub fn grant_keywords<H: EngineHooks>(
        &mut self,
        ts: Timestamp,
        keywords: impl IntoIterator<Item = Keyword>,
        hooks: &mut H,
    ) -> Vec<KeywordId> {
        let instances: Vec<KeywordInstance> = keywords
            .into_iter()
            .map(|k| self.keyword_ids.instance(k))
            .collect();
        let ids = instances.iter().map(|k| k.id).collect();
        self.add_keyword_change(ts, KeywordChange::new().granting(instances), hooks);
        ids
    }

    pub fn remove_keyword_change<H: EngineHooks>(&mut self, ts: Timestamp, hooks: &mut H) -> bool {
        let removed = self.ledger.remove_keyword_change(ts).is_some();
        if removed {
            self.sync_keyword_behaviors(hooks);
            self.notify(hooks, ChangeSet::KEYWORDS);
        }
        removed
    }

    pub fn add_pt_override(&mut self, ts: Timestamp, change: PtOverride, hooks: &mut impl ChangeListener) {
        self.ledger.add_pt_override(ts, change);
        self.notify(hooks, ChangeSet::POWER_TOUGHNESS);
    }

    pub fn remove_pt_override(&mut self, ts: Timestamp, hooks: &mut impl ChangeListener) -> bool {
        let removed = self.ledger.remove_pt_override(ts).is_some();
        if removed {
            self.notify(hooks, ChangeSet::POWER_TOUGHNESS);
        }
        removed
    }

    /// Add a temporary power/toughness boost on top of the effective
    /// values.
    pub fn add_boost(&mut self, ts: Timestamp, power: i32, toughness: i32, hooks: &mut impl ChangeListener) {
        trace!(object = %self.id, ts = %ts, power, toughness, "boost added");
        self.boosts.insert(ts, (power, toughness));
        self.notify(hooks, ChangeSet::POWER_TOUGHNESS);
    }

    pub fn remove_boost(&mut self, ts: Timestamp, hooks: &mut impl ChangeListener) -> bool {
        let removed = self.boosts.remove(ts).is_some();
        if removed {
            self.notify(hooks, ChangeSet::POWER_TOUGHNESS);
        }
        removed
    }

    /// Remove every record and boost stamped `ts`. Returns what changed.
    pub fn remove_modifications_at<H: EngineHooks>(&mut self, ts: Timestamp, hooks: &mut H) -> ChangeSet {
        let mut changed = self.ledger.remove_at(ts);
        if self.boosts.remove(ts).is_some() {
            changed |= ChangeSet::POWER_TOUGHNESS;
        }
        if changed.contains(ChangeSet::KEYWORDS) {
            self.sync_keyword_behaviors(hooks);
        }
        self.notify(hooks, changed);
        changed
    }

    #[must_use]
    pub fn ledger(&self) -> &ModificationLedger {
        &self.ledger
    }

    /// Make the current face's keyword behaviors match the effective
    /// keyword set: compile what is live and missing, retract the rest.
    fn sync_keyword_behaviors<H: EngineHooks>(&mut self, hooks: &mut H) {
        let live = self.keywords(&*hooks);
        let host = self.id;
        let rep = self.store.current_mut();
        let intrinsic: SmallVec<[KeywordId; 8]> = rep.keywords.iter().map(|k| k.id).collect();

        let mut attached: Vec<KeywordId> = rep
            .behaviors
            .iter()
            .map(|b| b.id.origin)
            .chain(rep.variables.iter().map(|(_, v)| v.origin))
            .filter_map(|origin| match origin {
                Origin::Keyword(id) => Some(id),
                Origin::Printed(_) => None,
            })
            .collect();
        attached.sort_unstable();
        attached.dedup();
        for id in attached {
            if !live.iter().any(|k| k.id == id) {
                retract(rep, id, &mut *hooks);
            }
        }
        for instance in &live {
            if rep.behaviors.from_origin(Origin::Keyword(instance.id)).next().is_none() {
                expand(rep, host, instance, intrinsic.contains(&instance.id), &mut *hooks);
            }
        }
    }

    // === Effective characteristics ===

    #[must_use]
    pub fn type_line(&self) -> TypeLine {
        self.ledger.effective_type(&self.store.current().types)
    }

    #[must_use]
    pub fn colors(&self) -> ColorSet {
        self.ledger.effective_color(self.store.current().colors)
    }

    /// Effective keywords. `rules` decides which additions are forbidden.
    #[must_use]
    pub fn keywords<R: StaticRules + ?Sized>(&self, rules: &R) -> Vec<KeywordInstance> {
        self.ledger
            .effective_keywords(&self.store.current().keywords, |k| {
                rules.is_keyword_forbidden(self.id, k)
            })
    }

    /// Keywords granted by counters on the object (flying counters and
    /// the like). The host applies these as external grants.
    #[must_use]
    pub fn counter_keywords(&self) -> Vec<Keyword> {
        self.counters.keyword_grants()
    }

    #[must_use]
    pub fn has_keyword<R: StaticRules + ?Sized>(&self, name: &str, rules: &R) -> bool {
        self.keywords(rules).iter().any(|k| k.matches(name))
    }

    /// Power and toughness from the printed values and overrides, before
    /// counters and boosts.
    #[must_use]
    pub fn base_pt(&self) -> (i32, i32) {
        let rep = self.store.current();
        self.ledger.effective_pt().or_base(rep.power, rep.toughness)
    }

    /// Net power and toughness: base, then counters, then boosts.
    #[must_use]
    pub fn pt(&self) -> (i32, i32) {
        let (power, toughness) = self.base_pt();
        let (cp, ct) = self.counters.pt_bonus();
        let (bp, bt) = self
            .boosts
            .values()
            .fold((0i32, 0i32), |(p, t), (dp, dt)| (p.saturating_add(*dp), t.saturating_add(*dt)));
        (
            power.saturating_add(cp).saturating_add(bp),
            toughness.saturating_add(ct).saturating_add(bt),
        )
    }

    #[must_use]
    pub fn power(&self) -> i32 {
        self.pt().0
    }

    #[must_use]
    pub fn toughness(&self) -> i32 {
        self.pt().1
    }

    // === Counters ===

    #[must_use]
    pub fn counters(&self) -> &CounterLedger {
        &self.counters
    }

    #[must_use]
    pub fn counter(&self, counter: &CounterType) -> u32 {
        self.counters.get(counter)
    }

    /// Put counters on the object.
    ///
    /// Negative amounts count as zero. If the object can't have this
    /// counter type or a replacement prevents the event, nothing is
    /// added. Raises one trigger per counter, then one for the batch.
    pub fn add_counters<H: EngineHooks>(
        &mut self,
        counter: CounterType,
        amount: i32,
        source: Option<ObjectId>,
        hooks: &mut H,
    ) -> CounterDelta {
        let amount = amount.max(0);
        if amount == 0 || !hooks.can_receive_counters(self.id, &counter) {
            return self.counters.add(counter, 0);
        }

        let mut params = ReplacementParams::new(ReplacementKind::AddCounter, self.id)
            .with_source(source)
            .with_counter(counter.clone())
            .with_amount(i64::from(amount));
        if hooks.run_replacement(&mut params) == ReplacementResult::PreventedEntirely {
            debug!(object = %self.id, counter = %counter, "counter addition prevented");
            return self.counters.add(counter, 0);
        }
        let counter = params.counter.unwrap_or(counter);
        let amount = i32::try_from(params.amount.max(0)).unwrap_or(i32::MAX);

        let delta = self.counters.add(counter, amount);
        if delta.is_noop() {
            return delta;
        }
        for _ in 0..delta.amount() {
            let mut unit = TriggerParams::new(self.id)
                .with_counter(delta.counter.clone())
                .with_amount(1);
            unit.source = source;
            hooks.run_trigger(TriggerKind::CounterAdded, unit, false);
        }
        let mut once = TriggerParams::new(self.id)
            .with_counter(delta.counter.clone())
            .with_amount(i64::from(delta.amount()));
        once.source = source;
        hooks.run_trigger(TriggerKind::CounterAddedOnce, once, false);

        self.notify(hooks, Self::counter_changes(&delta.counter));
        delta
    }

    /// Remove counters, never below zero. Raises one trigger per counter
    /// removed.
    pub fn remove_counters<H: EngineHooks>(
        &mut self,
        counter: CounterType,
        amount: i32,
        hooks: &mut H,
    ) -> CounterDelta {
        let delta = self.counters.remove(counter, amount);
        if delta.is_noop() {
            return delta;
        }
        for _ in 0..delta.amount() {
            hooks.run_trigger(
                TriggerKind::CounterRemoved,
                TriggerParams::new(self.id)
                    .with_counter(delta.counter.clone())
                    .with_amount(1),
                false,
            );
        }
        self.notify(hooks, Self::counter_changes(&delta.counter));
        delta
    }

    fn counter_changes(counter: &CounterType) -> ChangeSet {
        let mut changes = ChangeSet::COUNTERS;
        if counter.pt_bonus().is_some() {
            changes |= ChangeSet::POWER_TOUGHNESS;
        }
        if counter.granted_keyword().is_some() {
            changes |= ChangeSet::KEYWORDS;
        }
        changes
    }

    // === Damage ===

    #[must_use]
    pub fn damage(&self) -> &DamageLedger {
        &self.damage
    }

    /// Deal damage to the object. Returns the amount actually dealt after
    /// replacement effects.
    pub fn apply_damage<H: EngineHooks>(
        &mut self,
        source: ObjectId,
        amount: u32,
        is_combat: bool,
        deathtouch: bool,
        hooks: &mut H,
    ) -> u32 {
        let mut params = ReplacementParams::new(ReplacementKind::DamageDone, self.id)
            .with_source(Some(source))
            .with_amount(i64::from(amount))
            .with_combat(is_combat);
        if hooks.run_replacement(&mut params) == ReplacementResult::PreventedEntirely {
            return 0;
        }
        let amount = u32::try_from(params.amount.max(0)).unwrap_or(u32::MAX);
        if amount == 0 {
            return 0;
        }

        self.damage.mark(amount, deathtouch);
        self.damage.record_damage(source, amount, params.is_combat);
        trace!(object = %self.id, source = %source, amount, "damage applied");
        hooks.run_trigger(
            TriggerKind::DamageDone,
            TriggerParams::new(self.id)
                .with_source(source)
                .with_amount(i64::from(amount))
                .with_combat(params.is_combat),
            false,
        );
        self.notify(hooks, ChangeSet::DAMAGE);
        amount
    }

    /// Record damage this object dealt.
    pub fn record_damage_dealt(&mut self, amount: u32, is_combat: bool) {
        self.damage.record_dealt(amount, is_combat);
    }

    /// Damage still needed to destroy the object: net toughness minus
    /// marked and assigned damage.
    #[must_use]
    pub fn lethal_damage(&self) -> i32 {
        let taken = i64::from(self.damage.marked()) + i64::from(self.damage.assigned());
        let left = i64::from(self.toughness()) - taken;
        i32::try_from(left).unwrap_or(i32::MIN)
    }

    /// End-of-turn cleanup of damage bookkeeping.
    pub fn clear_turn(&mut self, hooks: &mut impl ChangeListener) {
        let had_damage = self.damage.marked() > 0;
        self.damage.clear_turn();
        if had_damage {
            self.notify(hooks, ChangeSet::DAMAGE);
        }
    }

    // === Tapped and sickness ===

    #[must_use]
    pub fn is_tapped(&self) -> bool {
        self.tapped
    }

    pub fn tap<H: EngineHooks>(&mut self, hooks: &mut H) -> bool {
        if self.tapped {
            return false;
        }
        self.tapped = true;
        hooks.run_trigger(TriggerKind::Taps, TriggerParams::new(self.id), false);
        self.notify(hooks, ChangeSet::TAPPED);
        true
    }

    /// Untap unless a replacement prevents it.
    pub fn untap<H: EngineHooks>(&mut self, hooks: &mut H) -> bool {
        if !self.tapped {
            return false;
        }
        let mut params = ReplacementParams::new(ReplacementKind::Untap, self.id);
        if hooks.run_replacement(&mut params) == ReplacementResult::PreventedEntirely {
            return false;
        }
        self.tapped = false;
        hooks.run_trigger(TriggerKind::Untaps, TriggerParams::new(self.id), false);
        self.notify(hooks, ChangeSet::TAPPED);
        true
    }

    /// Mark whether the object came under its controller's control this
    /// turn.
    pub fn set_sick(&mut self, sick: bool) {
        self.sick = sick;
    }

    /// Summoning sick: came under control this turn and has no haste.
    #[must_use]
    pub fn is_sick<R: StaticRules + ?Sized>(&self, rules: &R) -> bool {
        self.sick && !self.has_keyword("Haste", rules)
    }
}

impl ConditionFacts for GameObject {
    fn counters(&self, counter: &CounterType) -> u32 {
        self.counters.get(counter)
    }

    fn face_down(&self) -> bool {
        self.is_face_down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{BehaviorKind, Condition};
    use crate::characteristics::{Color, PtValue};
    use crate::hooks::RecordingHooks;
    use crate::object::{CardDefinition, FaceDefinition};

    fn bear(hooks: &mut RecordingHooks) -> GameObject {
        let rep = Representation::new(FaceName::Original, "Bear")
            .with_types(TypeLine::parse("Creature — Bear"))
            .with_pt(PtValue::Fixed(2), PtValue::Fixed(2));
        GameObject::new(ObjectId(1), PlayerId(0), rep, RulesConfig::default(), hooks)
    }

    fn prevent(_: &mut ReplacementParams) -> ReplacementResult {
        ReplacementResult::PreventedEntirely
    }

    #[test]
    fn test_haste_clears_sickness() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.set_sick(true);
        assert!(object.is_sick(&hooks));

        object.grant_keywords(Timestamp(7), [Keyword::Haste], &mut hooks);
        assert!(!object.is_sick(&hooks));

        assert!(object.remove_keyword_change(Timestamp(7), &mut hooks));
        assert!(object.is_sick(&hooks));
    }

    #[test]
    fn test_forbidden_keyword_not_gained() {
        let mut hooks = RecordingHooks::new().with_forbidden_keyword("Haste");
        let mut object = bear(&mut hooks);
        object.set_sick(true);
        object.grant_keywords(Timestamp(1), [Keyword::Haste], &mut hooks);
        assert!(object.is_sick(&hooks));
    }

    #[test]
    fn test_defining_override_replays_first() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.add_pt_override(Timestamp(5), PtOverride::set(0, 0).defining(), &mut hooks);
        object.add_pt_override(Timestamp(3), PtOverride::set(3, 3), &mut hooks);
        assert_eq!(object.pt(), (3, 3));
    }

    #[test]
    fn test_counters_and_boosts_layer() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.add_counters(CounterType::PlusOnePlusOne, 2, None, &mut hooks);
        object.add_boost(Timestamp(1), 1, 0, &mut hooks);
        assert_eq!(object.pt(), (5, 4));
        object.remove_boost(Timestamp(1), &mut hooks);
        assert_eq!(object.pt(), (4, 4));
    }

    #[test]
    fn test_add_counters_triggers_per_unit() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        let delta = object.add_counters(CounterType::Time, 3, Some(ObjectId(9)), &mut hooks);
        assert_eq!((delta.before, delta.after), (0, 3));
        assert_eq!(hooks.triggers_of(TriggerKind::CounterAdded).count(), 3);
        let once: Vec<_> = hooks.triggers_of(TriggerKind::CounterAddedOnce).collect();
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].amount, 3);
        assert_eq!(once[0].source, Some(ObjectId(9)));
        assert_eq!(hooks.notifications, vec![(ObjectId(1), ChangeSet::COUNTERS)]);
    }

    #[test]
    fn test_add_counters_suppressed() {
        let mut hooks = RecordingHooks::new().with_forbidden_counter(CounterType::MinusOneMinusOne);
        let mut object = bear(&mut hooks);
        let delta = object.add_counters(CounterType::MinusOneMinusOne, 2, None, &mut hooks);
        assert!(delta.is_noop());
        assert!(hooks.triggers.is_empty());

        let mut hooks = RecordingHooks::new().with_replacement(prevent);
        let delta = object.add_counters(CounterType::PlusOnePlusOne, 2, None, &mut hooks);
        assert!(delta.is_noop());
        assert_eq!(object.counter(&CounterType::PlusOnePlusOne), 0);
    }

    #[test]
    fn test_negative_add_is_zero() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        assert!(object.add_counters(CounterType::Time, -5, None, &mut hooks).is_noop());
        assert!(hooks.replacements.is_empty());
    }

    #[test]
    fn test_remove_counters_clamps() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.add_counters(CounterType::Time, 2, None, &mut hooks);
        let delta = object.remove_counters(CounterType::Time, 5, &mut hooks);
        assert_eq!((delta.before, delta.after), (2, 0));
        assert_eq!(hooks.triggers_of(TriggerKind::CounterRemoved).count(), 2);
    }

    #[test]
    fn test_damage_and_lethal() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        assert_eq!(object.apply_damage(ObjectId(2), 1, true, false, &mut hooks), 1);
        assert_eq!(object.lethal_damage(), 1);
        assert_eq!(object.damage().received_from(ObjectId(2)).combat, 1);
        assert_eq!(hooks.triggers_of(TriggerKind::DamageDone).count(), 1);

        object.clear_turn(&mut hooks);
        assert_eq!(object.lethal_damage(), 2);
    }

    #[test]
    fn test_prevented_damage() {
        let mut hooks = RecordingHooks::new().with_replacement(prevent);
        let mut object = bear(&mut hooks);
        assert_eq!(object.apply_damage(ObjectId(2), 3, false, true, &mut hooks), 0);
        assert!(!object.damage().has_deathtouch_damage());
    }

    #[test]
    fn test_untap_replacement() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        assert!(object.tap(&mut hooks));
        assert!(!object.tap(&mut hooks));

        let mut frozen = RecordingHooks::new().with_replacement(prevent);
        assert!(!object.untap(&mut frozen));
        assert!(object.is_tapped());
        assert!(object.untap(&mut hooks));
    }

    #[test]
    fn test_batch_sends_one_notification() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.batch(&mut hooks, |object, hooks| {
            object.add_color_change(Timestamp(1), ColorChange::set(ColorSet::RED), hooks);
            object.add_type_change(Timestamp(2), TypeChange::new(), hooks);
            object.tap(hooks);
        });
        assert_eq!(
            hooks.notifications,
            vec![(ObjectId(1), ChangeSet::COLOR | ChangeSet::TYPE | ChangeSet::TAPPED)]
        );
    }

    #[test]
    fn test_invalid_color_changes_nothing() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        assert!(object.add_color_names(Timestamp(1), "red purple", false, &mut hooks).is_err());
        assert!(object.ledger().is_empty());
        assert!(hooks.notifications.is_empty());
        object.add_color_names(Timestamp(2), "blue", true, &mut hooks).unwrap();
        assert!(object.colors().contains(Color::Blue));
    }

    #[test]
    fn test_granted_keyword_compiles_and_retracts() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        let ids = object.grant_keywords(Timestamp(3), [Keyword::Bushido(1)], &mut hooks);
        let origin = Origin::Keyword(ids[0]);
        let granted: Vec<_> = object.representation().behaviors.from_origin(origin).collect();
        assert_eq!(granted.len(), 2);
        assert!(granted.iter().all(|b| !b.intrinsic));

        let changed = object.remove_modifications_at(Timestamp(3), &mut hooks);
        assert_eq!(changed, ChangeSet::KEYWORDS);
        assert!(object.representation().behaviors.is_empty());
    }

    #[test]
    fn test_lose_all_abilities_retracts_printed() {
        let mut hooks = RecordingHooks::new();
        let rep = Representation::new(FaceName::Original, "Butcher Ghoul")
            .with_keywords([KeywordInstance::new(KeywordId(0), Keyword::Undying)]);
        let mut object = GameObject::new(ObjectId(1), PlayerId(0), rep, RulesConfig::default(), &mut hooks);
        assert_eq!(object.representation().behaviors.len(), 1);

        object.add_keyword_change(Timestamp(2), KeywordChange::new().removing_all(), &mut hooks);
        assert!(object.representation().behaviors.is_empty());

        object.remove_keyword_change(Timestamp(2), &mut hooks);
        let restored: Vec<_> = object.representation().behaviors.iter().collect();
        assert_eq!(restored.len(), 1);
        assert!(restored[0].intrinsic);
        assert_eq!(object.keyword_instance(Keyword::Flying).id, KeywordId(1));
    }

    #[test]
    fn test_morph_round_trip() {
        let card = CardDefinition::new(
            CardId(3),
            FaceDefinition::new("Hidden Dragon")
                .with_types(TypeLine::parse("Creature — Dragon"))
                .with_pt(PtValue::Fixed(5), PtValue::Fixed(5))
                .with_keyword("Megamorph:5 R"),
        );
        let mut hooks = RecordingHooks::new();
        let mut object =
            GameObject::from_definition(ObjectId(4), PlayerId(1), &card, RulesConfig::default(), &mut hooks)
                .unwrap();

        assert!(object.turn_face_down(false, &mut hooks).unwrap());
        assert_eq!(object.pt(), (2, 2));
        assert!(object.name().is_empty());
        let action = object
            .representation()
            .behaviors
            .of_kind(BehaviorKind::Activated)
            .next()
            .unwrap();
        assert_eq!(action.recipe.condition, Condition::FaceDown);

        assert!(object.turn_face_up(&mut hooks));
        assert!(object.was_turned_face_up());
        assert_eq!(object.pt(), (5, 5));
        assert_eq!(hooks.triggers_of(TriggerKind::TurnedFaceUp).count(), 1);
        assert!(!object.turn_face_up(&mut hooks));
    }

    #[test]
    fn test_switch_without_propagation_is_silent() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.add_alternate(FaceName::Transformed, Representation::new(FaceName::Transformed, "Werebear"), &mut hooks);
        hooks.clear();
        assert!(object.switch_face(FaceName::Transformed, Some(false), &mut hooks));
        assert!(hooks.notifications.is_empty());
        assert!(!object.switch_face(FaceName::Transformed, None, &mut hooks));
        assert_eq!(object.name(), "Werebear");
    }

    #[test]
    fn test_switch_moves_granted_behaviors() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.add_alternate(FaceName::Transformed, Representation::new(FaceName::Transformed, "Werebear"), &mut hooks);
        object.grant_keywords(Timestamp(1), [Keyword::Bushido(2)], &mut hooks);
        hooks.clear();

        assert!(object.switch_face(FaceName::Transformed, Some(true), &mut hooks));
        assert_eq!(object.representation().behaviors.len(), 2);
        assert!(object.store().get(FaceName::Original).unwrap().behaviors.is_empty());
        assert_eq!(hooks.notifications.len(), 1);
        assert!(hooks.notifications[0].1.contains(ChangeSet::FACE));
        assert_eq!(hooks.triggers_of(TriggerKind::FaceSwitched).count(), 1);
        assert_eq!(hooks.notifications[0].1, ChangeSet::FACE_SWITCH);
    }

    #[test]
    fn test_grant_cycles_on_default_stack() {
        let worker = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let mut hooks = RecordingHooks::new();
                let mut object = bear(&mut hooks);
                let baseline = hooks.factory.built();
                for round in 0..50u64 {
                    object.grant_keywords(Timestamp(round), [Keyword::Bushido(1)], &mut hooks);
                    assert_eq!(object.representation().behaviors.len(), 2);
                    assert!(object.remove_keyword_change(Timestamp(round), &mut hooks));
                    assert!(object.representation().behaviors.is_empty());
                }
                (baseline, hooks.factory.built())
            })
            .unwrap();
        let (baseline, after) = worker.join().unwrap();
        assert_eq!(after, baseline, "retracted behaviors give their handles back");
    }

    #[test]
    fn test_remove_current_face_recompiles_on_original() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        object.add_alternate(FaceName::Animated, Representation::new(FaceName::Animated, "Golem"), &mut hooks);
        object.switch_face(FaceName::Animated, Some(true), &mut hooks);
        let ids = object.grant_keywords(Timestamp(1), [Keyword::Bushido(2)], &mut hooks);
        hooks.clear();

        assert!(object.remove_face(FaceName::Animated, &mut hooks));
        assert_eq!(object.face(), FaceName::Original);
        assert!(object.has_keyword("Bushido", &hooks));
        let origin = Origin::Keyword(ids[0]);
        assert_eq!(object.representation().behaviors.from_origin(origin).count(), 2);
        assert_eq!(hooks.notifications, vec![(ObjectId(1), ChangeSet::FACE_SWITCH)]);
        assert_eq!(hooks.factory.built(), 2);
        assert!(!object.remove_face(FaceName::Animated, &mut hooks));
        assert!(!object.remove_face(FaceName::Original, &mut hooks));
    }

    #[test]
    fn test_swap_keeps_current_characteristics() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        let melded = Representation::new(FaceName::Meld, "Colossus").with_pt(PtValue::Fixed(9), PtValue::Fixed(9));
        object.add_alternate(FaceName::Meld, melded, &mut hooks);
        hooks.clear();

        assert!(object.swap_faces(FaceName::Original, FaceName::Meld, &mut hooks));
        assert_eq!(object.face(), FaceName::Meld);
        assert_eq!(object.name(), "Bear");
        assert_eq!(object.pt(), (2, 2));
        assert_eq!(object.store().get(FaceName::Original).unwrap().name, "Colossus");
        assert_eq!(hooks.notifications, vec![(ObjectId(1), ChangeSet::FACE)]);
    }

    #[test]
    fn test_replacing_alternate_releases_old_behaviors() {
        let mut hooks = RecordingHooks::new();
        let mut object = bear(&mut hooks);
        let back = || {
            Representation::new(FaceName::Transformed, "Werebear")
                .with_keywords([KeywordInstance::new(KeywordId(0), Keyword::Bushido(1))])
        };
        object.add_alternate(FaceName::Transformed, back(), &mut hooks);
        object.add_alternate(FaceName::Transformed, back(), &mut hooks);
        assert_eq!(hooks.factory.built(), 2);
    }

    #[test]
    fn test_definition_must_lead_with_original() {
        let card = CardDefinition {
            id: CardId(5),
            faces: vec![
                (FaceName::Transformed, FaceDefinition::new("Back").with_keyword("Bushido:1")),
                (FaceName::Original, FaceDefinition::new("Front")),
            ],
        };
        let mut hooks = RecordingHooks::new();
        let err = GameObject::from_definition(ObjectId(1), PlayerId(0), &card, RulesConfig::default(), &mut hooks)
            .unwrap_err();
        assert_eq!(err, CardError::UnknownRepresentation(FaceName::Original));
        assert_eq!(hooks.factory.built(), 0);
    }
}
