//! Construction [`Timeline`] of a [`Building`].
//!
//! [`Building`]: super::Building

use common::{define_kind, Bilingual, Language};
use derive_more::{AsRef, Display, Error, From};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{text::define_text, Description, Name};

/// Ordered list of construction [`Phase`]s of a [`Building`].
///
/// The `order` of every [`Phase`] always equals its index plus one.
///
/// Persisted as a JSON array of [`Phase`]s in the shape of:
/// ```json
/// [
///   { "id": "…", "phase_id": "Foundation Work", "phase_name_ar": "أعمال الأساسات", "status": "completed", "order": 1 },
///   { "id": "…", "phase_id": "Finishing", "phase_name_ar": "", "status": "upcoming", "order": 2 }
/// ]
/// ```
///
/// [`Building`]: super::Building
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct Timeline(Vec<Phase>);

impl Timeline {
    /// Creates a new [`Timeline`] out of the provided [`Phase`]s, sorting
    /// them by their `order` and renumbering them densely.
    #[must_use]
    pub fn new(mut phases: Vec<Phase>) -> Self {
        phases.sort_by_key(|p| p.order);
        Self::renumbered(phases)
    }

    /// Returns the [`Phase`]s of this [`Timeline`] in order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.0
    }

    /// Returns the number of [`Phase`]s in this [`Timeline`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this [`Timeline`] has no [`Phase`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the percentage of [`Status::Completed`] [`Phase`]s, rounded
    /// to the nearest integer.
    #[must_use]
    pub fn progress(&self) -> u8 {
        let len = self.0.len();
        if len == 0 {
            return 0;
        }
        let completed = self
            .0
            .iter()
            .filter(|p| p.status == Status::Completed)
            .count();
        // Half-up rounding of `completed * 100 / len`.
        u8::try_from((completed * 200 + len) / (2 * len)).unwrap_or(100)
    }

    /// Applies the provided [`Edit`] to this [`Timeline`], returning the
    /// edited one.
    ///
    /// # Errors
    ///
    /// Errors if the [`Edit`] refers to a [`Phase`] index out of bounds.
    pub fn apply(&self, edit: Edit) -> Result<Self, EditError> {
        match edit {
            Edit::Add => Ok(self.add_phase()),
            Edit::Remove { index } => self.remove_phase(index),
            Edit::Move { index, direction } => {
                self.move_phase(index, direction)
            }
            Edit::Update { index, field } => self.update_phase(index, field),
        }
    }

    /// Appends a new [`Status::Upcoming`] [`Phase`] with empty labels.
    #[must_use]
    pub fn add_phase(&self) -> Self {
        let mut phases = self.0.clone();
        phases.push(Phase {
            id: PhaseId::new(),
            label: Label::empty(),
            label_ar: Label::empty(),
            status: Status::Upcoming,
            order: 0,
        });
        Self::renumbered(phases)
    }

    /// Removes the [`Phase`] at the provided `index`, renumbering the rest.
    ///
    /// # Errors
    ///
    /// Errors if the `index` is out of bounds.
    pub fn remove_phase(&self, index: usize) -> Result<Self, EditError> {
        self.check_index(index)?;

        let mut phases = self.0.clone();
        _ = phases.remove(index);
        Ok(Self::renumbered(phases))
    }

    /// Swaps the [`Phase`] at the provided `index` with its neighbor in the
    /// provided [`Direction`].
    ///
    /// Moving the first [`Phase`] up or the last one down leaves the
    /// [`Timeline`] unchanged.
    ///
    /// # Errors
    ///
    /// Errors if the `index` is out of bounds.
    pub fn move_phase(
        &self,
        index: usize,
        direction: Direction,
    ) -> Result<Self, EditError> {
        self.check_index(index)?;

        let neighbor = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => {
                Some(index + 1).filter(|&i| i < self.0.len())
            }
        };
        let Some(neighbor) = neighbor else {
            return Ok(self.clone());
        };

        let mut phases = self.0.clone();
        phases.swap(index, neighbor);
        Ok(Self::renumbered(phases))
    }

    /// Sets the provided [`Field`] of the [`Phase`] at the provided `index`.
    ///
    /// Setting a [`Status::Completed`] or [`Status::InProgress`] status
    /// completes every preceding [`Status::Upcoming`] [`Phase`]. Phases
    /// after the `index` are never touched.
    ///
    /// # Errors
    ///
    /// Errors if the `index` is out of bounds.
    pub fn update_phase(
        &self,
        index: usize,
        field: Field,
    ) -> Result<Self, EditError> {
        self.check_index(index)?;

        let mut phases = self.0.clone();
        match field {
            Field::Label(label) => phases[index].label = label,
            Field::LabelAr(label) => phases[index].label_ar = label,
            Field::Status(status) => {
                phases[index].status = status;
                if matches!(status, Status::Completed | Status::InProgress) {
                    for phase in &mut phases[..index] {
                        if phase.status == Status::Upcoming {
                            phase.status = Status::Completed;
                        }
                    }
                }
            }
        }
        Ok(Self(phases))
    }

    /// Checks whether the provided `index` points to an existing [`Phase`].
    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfBounds {
                index,
                len: self.0.len(),
            })
        }
    }

    /// Sets the `order` of every [`Phase`] to its position.
    fn renumbered(mut phases: Vec<Phase>) -> Self {
        for (i, phase) in phases.iter_mut().enumerate() {
            phase.order = u16::try_from(i + 1).unwrap_or(u16::MAX);
        }
        Self(phases)
    }
}

impl From<Vec<Phase>> for Timeline {
    fn from(phases: Vec<Phase>) -> Self {
        Self::new(phases)
    }
}

impl From<Timeline> for Vec<Phase> {
    fn from(timeline: Timeline) -> Self {
        timeline.0
    }
}

/// Construction phase of a [`Timeline`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Phase {
    /// Stable ID of this [`Phase`].
    ///
    /// Generated for [`Phase`]s persisted before IDs were introduced.
    #[serde(default = "PhaseId::new")]
    id: PhaseId,

    /// English [`Label`] of this [`Phase`].
    ///
    /// For legacy [`Phase`]s this is the [`MasterId`] of a [`MasterPhase`].
    #[serde(rename = "phase_id")]
    label: Label,

    /// Arabic [`Label`] of this [`Phase`], empty if none.
    #[serde(
        rename = "phase_name_ar",
        default = "Label::empty",
        deserialize_with = "null_as_empty_label"
    )]
    label_ar: Label,

    /// [`Status`] of this [`Phase`].
    status: Status,

    /// 1-based position of this [`Phase`] in its [`Timeline`].
    order: u16,
}

impl Phase {
    /// Creates a new [`Phase`] to be placed into a [`Timeline`] at the
    /// provided `order`.
    #[must_use]
    pub fn new(
        label: Label,
        label_ar: Label,
        status: Status,
        order: u16,
    ) -> Self {
        Self {
            id: PhaseId::new(),
            label,
            label_ar,
            status,
            order,
        }
    }

    /// Returns the [`PhaseId`] of this [`Phase`].
    #[must_use]
    pub const fn id(&self) -> PhaseId {
        self.id
    }

    /// Returns the English [`Label`] of this [`Phase`].
    #[must_use]
    pub const fn label(&self) -> &Label {
        &self.label
    }

    /// Returns the Arabic [`Label`] of this [`Phase`], if any.
    #[must_use]
    pub fn label_ar(&self) -> Option<&Label> {
        (!self.label_ar.is_blank()).then_some(&self.label_ar)
    }

    /// Returns the [`Status`] of this [`Phase`].
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the 1-based position of this [`Phase`].
    #[must_use]
    pub const fn order(&self) -> u16 {
        self.order
    }

    /// Resolves the name of this [`Phase`] to display in the provided
    /// [`Language`].
    ///
    /// A [`Phase`] without an Arabic [`Label`] whose English [`Label`] is the
    /// [`MasterId`] of one of the provided [`MasterPhase`]s is displayed
    /// with the [`MasterPhase`] name.
    #[must_use]
    pub fn display_name<'a>(
        &'a self,
        lang: Language,
        masters: &'a [MasterPhase],
    ) -> &'a str {
        if self.label_ar.is_blank() {
            if let Some(master) =
                masters.iter().find(|m| m.id.as_str() == self.label.as_str())
            {
                return master.name.resolve(lang).as_str();
            }
        }

        match lang {
            Language::Ar if !self.label_ar.is_blank() => self.label_ar.as_str(),
            Language::Ar | Language::En => self.label.as_str(),
        }
    }
}

/// Deserializes a nullable [`Label`], treating `null` as an empty one.
fn null_as_empty_label<'de, D>(deserializer: D) -> Result<Label, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Label>::deserialize(deserializer)?.unwrap_or_else(Label::empty))
}

/// ID of a [`Phase`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct PhaseId(Uuid);

impl PhaseId {
    /// Creates a new random [`PhaseId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhaseId {
    fn default() -> Self {
        Self::new()
    }
}

define_text! {
    #[doc = "Display label of a [`Phase`], possibly empty while being edited."]
    pub struct Label;
    check = |s| s.trim() == s && s.len() <= 512;
}

impl Label {
    /// Creates a new empty [`Label`].
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Indicates whether this [`Label`] has no visible characters.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

define_kind! {
    #[doc = "Status of a construction [`Phase`]."]
    enum Status {
        #[doc = "Work has not started yet."]
        Upcoming = "upcoming",

        #[doc = "Work is ongoing."]
        InProgress = "in_progress",

        #[doc = "Work is done."]
        Completed = "completed",
    }
}

/// Direction to move a [`Phase`] within its [`Timeline`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Towards the beginning of the [`Timeline`].
    Up,

    /// Towards the end of the [`Timeline`].
    Down,
}

/// Editable field of a [`Phase`] with its new value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Field {
    /// English [`Label`].
    Label(Label),

    /// Arabic [`Label`], empty to remove it.
    LabelAr(Label),

    /// [`Status`].
    Status(Status),
}

/// Single edit of a [`Timeline`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Edit {
    /// Append a new [`Phase`].
    Add,

    /// Remove the [`Phase`] at the `index`.
    Remove {
        /// Index of the [`Phase`] to remove.
        index: usize,
    },

    /// Move the [`Phase`] at the `index` in the `direction`.
    Move {
        /// Index of the [`Phase`] to move.
        index: usize,

        /// [`Direction`] to move the [`Phase`] in.
        direction: Direction,
    },

    /// Set a [`Field`] of the [`Phase`] at the `index`.
    Update {
        /// Index of the [`Phase`] to update.
        index: usize,

        /// [`Field`] to set.
        field: Field,
    },
}

/// Error of applying an [`Edit`] to a [`Timeline`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum EditError {
    /// [`Phase`] index is out of the [`Timeline`] bounds.
    #[display("`Phase` index {index} is out of bounds of {len} phases")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,

        /// Number of [`Phase`]s in the [`Timeline`].
        len: usize,
    },
}

/// Reference construction phase that legacy [`Phase`]s point to by their
/// English [`Label`].
#[derive(Clone, Debug)]
pub struct MasterPhase {
    /// ID of this [`MasterPhase`].
    pub id: MasterId,

    /// [`Name`] of this [`MasterPhase`].
    pub name: Bilingual<Name>,

    /// [`Description`] of this [`MasterPhase`].
    pub description: Bilingual<Description>,

    /// Typical duration of this [`MasterPhase`] in days, if known.
    pub typical_duration_days: Option<u16>,

    /// Position of this [`MasterPhase`] among the others.
    pub display_order: i32,

    /// Indicator whether this [`MasterPhase`] is offered for new
    /// [`Timeline`]s.
    pub is_active: bool,
}

/// ID of a [`MasterPhase`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct MasterId(String);

impl MasterId {
    /// Creates a new [`MasterId`].
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the textual representation of this [`MasterId`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod spec {
    use common::{Bilingual, Language};

    use super::{
        Description, Direction, Edit, EditError, Field, Label, MasterId,
        MasterPhase, Name, Phase, Status, Timeline,
    };

    fn label(s: &str) -> Label {
        Label::new(s).unwrap()
    }

    fn timeline(statuses: &[Status]) -> Timeline {
        Timeline::new(
            statuses
                .iter()
                .enumerate()
                .map(|(i, &status)| {
                    Phase::new(
                        label(&format!("Phase {}", i + 1)),
                        Label::empty(),
                        status,
                        u16::try_from(i + 1).unwrap(),
                    )
                })
                .collect(),
        )
    }

    fn statuses(timeline: &Timeline) -> Vec<Status> {
        timeline.phases().iter().map(Phase::status).collect()
    }

    fn labels(timeline: &Timeline) -> Vec<&str> {
        timeline.phases().iter().map(|p| p.label().as_str()).collect()
    }

    fn assert_dense(timeline: &Timeline) {
        for (i, phase) in timeline.phases().iter().enumerate() {
            assert_eq!(usize::from(phase.order()), i + 1, "{timeline:?}");
        }
    }

    #[test]
    fn orders_stay_dense_under_edits() {
        use Status::Upcoming as U;

        let edits = [
            Edit::Add,
            Edit::Add,
            Edit::Remove { index: 0 },
            Edit::Add,
            Edit::Move {
                index: 2,
                direction: Direction::Up,
            },
            Edit::Remove { index: 3 },
            Edit::Move {
                index: 0,
                direction: Direction::Down,
            },
            Edit::Remove { index: 1 },
            Edit::Add,
        ];

        let mut tl = timeline(&[U, U, U]);
        for edit in edits {
            tl = tl.apply(edit).unwrap();
            assert_dense(&tl);
        }
        assert_eq!(tl.len(), 4);
    }

    #[test]
    fn construction_renumbers_sparse_orders() {
        let tl = Timeline::new(vec![
            Phase::new(label("Finishing"), Label::empty(), Status::Upcoming, 7),
            Phase::new(label("Foundation"), Label::empty(), Status::Upcoming, 2),
        ]);

        assert_eq!(labels(&tl), ["Foundation", "Finishing"]);
        assert_dense(&tl);
    }

    #[test]
    fn added_phase_is_empty_and_upcoming() {
        let tl = Timeline::default().add_phase();

        let phase = &tl.phases()[0];
        assert!(phase.label().is_blank());
        assert_eq!(phase.label_ar(), None);
        assert_eq!(phase.status(), Status::Upcoming);
        assert_eq!(phase.order(), 1);
    }

    #[test]
    fn added_phases_get_distinct_ids() {
        let tl = Timeline::default().add_phase().add_phase();

        assert_ne!(tl.phases()[0].id(), tl.phases()[1].id());
    }

    #[test]
    fn moving_past_the_edges_is_noop() {
        use Status::{Completed as C, InProgress as I, Upcoming as U};

        let tl = timeline(&[C, I, U]);

        assert_eq!(tl.move_phase(0, Direction::Up).unwrap(), tl);
        assert_eq!(tl.move_phase(2, Direction::Down).unwrap(), tl);
    }

    #[test]
    fn moving_swaps_with_neighbor() {
        use Status::Upcoming as U;

        let tl = timeline(&[U, U, U]);
        let moved = tl.move_phase(1, Direction::Down).unwrap();

        assert_eq!(labels(&moved), ["Phase 1", "Phase 3", "Phase 2"]);
        assert_eq!(moved.phases()[2].id(), tl.phases()[1].id());
        assert_dense(&moved);
    }

    #[test]
    fn in_progress_completes_preceding_upcoming_phases() {
        use Status::{Completed as C, InProgress as I, Upcoming as U};

        let tl = timeline(&[U, U, U])
            .update_phase(2, Field::Status(I))
            .unwrap();

        assert_eq!(statuses(&tl), [C, C, I]);
    }

    #[test]
    fn completing_first_phase_touches_nothing_else() {
        use Status::{Completed as C, Upcoming as U};

        let tl = timeline(&[U, U, U])
            .update_phase(0, Field::Status(C))
            .unwrap();

        assert_eq!(statuses(&tl), [C, U, U]);
    }

    #[test]
    fn completion_never_propagates_forward() {
        use Status::{Completed as C, InProgress as I, Upcoming as U};

        let tl = timeline(&[U, U, I])
            .update_phase(0, Field::Status(C))
            .unwrap();
        assert_eq!(statuses(&tl), [C, U, I]);

        let tl = timeline(&[U, I, I])
            .update_phase(0, Field::Status(I))
            .unwrap();
        assert_eq!(statuses(&tl), [I, I, I]);
    }

    #[test]
    fn setting_upcoming_completes_nothing() {
        use Status::{InProgress as I, Upcoming as U};

        let tl = timeline(&[U, I, I])
            .update_phase(2, Field::Status(U))
            .unwrap();

        assert_eq!(statuses(&tl), [U, I, U]);
    }

    #[test]
    fn in_progress_phases_before_are_kept() {
        use Status::{Completed as C, InProgress as I, Upcoming as U};

        let tl = timeline(&[I, U, U])
            .update_phase(2, Field::Status(C))
            .unwrap();

        assert_eq!(statuses(&tl), [I, C, C]);
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        use Status::Upcoming as U;

        let tl = timeline(&[U, U]);

        assert_eq!(
            tl.remove_phase(2),
            Err(EditError::IndexOutOfBounds { index: 2, len: 2 }),
        );
        assert!(tl.move_phase(5, Direction::Up).is_err());
        assert!(tl.update_phase(2, Field::Status(U)).is_err());
        assert!(Timeline::default().remove_phase(0).is_err());
    }

    #[test]
    fn building_a_timeline_from_scratch() {
        use Status::Completed as C;

        let tl = Timeline::default()
            .apply(Edit::Add)
            .and_then(|tl| {
                tl.apply(Edit::Update {
                    index: 0,
                    field: Field::Label(label("Foundation")),
                })
            })
            .and_then(|tl| tl.apply(Edit::Add))
            .and_then(|tl| {
                tl.apply(Edit::Update {
                    index: 1,
                    field: Field::Label(label("Framing")),
                })
            })
            .and_then(|tl| {
                tl.apply(Edit::Update {
                    index: 1,
                    field: Field::Status(C),
                })
            })
            .unwrap();

        let phases = tl
            .phases()
            .iter()
            .map(|p| (p.label().as_str(), p.status(), p.order()))
            .collect::<Vec<_>>();
        assert_eq!(phases, [("Foundation", C, 1), ("Framing", C, 2)]);
    }

    #[test]
    fn progress_is_rounded_percentage_of_completed() {
        use Status::{Completed as C, InProgress as I, Upcoming as U};

        assert_eq!(Timeline::default().progress(), 0);
        assert_eq!(timeline(&[C, I, U]).progress(), 33);
        assert_eq!(timeline(&[C, C, U]).progress(), 67);
        assert_eq!(timeline(&[C, U]).progress(), 50);
        assert_eq!(timeline(&[C, C]).progress(), 100);
    }

    #[test]
    fn deserializes_persisted_shape() {
        let json = r#"[
            {"phase_id": "Structural Frame", "phase_name_ar": "", "status": "in_progress", "order": 2},
            {"phase_id": "Foundation Work", "phase_name_ar": "أعمال الأساسات", "status": "completed", "order": 1},
            {"phase_id": "Finishing", "phase_name_ar": null, "status": "upcoming", "order": 3}
        ]"#;

        let tl: Timeline = serde_json::from_str(json).unwrap();

        assert_eq!(
            labels(&tl),
            ["Foundation Work", "Structural Frame", "Finishing"],
        );
        assert_eq!(
            tl.phases()[0].label_ar().map(Label::as_str),
            Some("أعمال الأساسات"),
        );
        assert_eq!(tl.phases()[1].label_ar(), None);
        assert_eq!(tl.phases()[2].label_ar(), None);
        assert_dense(&tl);
    }

    #[test]
    fn serializes_persisted_shape() {
        use Status::InProgress as I;

        let tl = timeline(&[I]);
        let json = serde_json::to_value(&tl).unwrap();

        assert_eq!(json[0]["phase_id"], "Phase 1");
        assert_eq!(json[0]["phase_name_ar"], "");
        assert_eq!(json[0]["status"], "in_progress");
        assert_eq!(json[0]["order"], 1);
        assert_eq!(json[0]["id"], tl.phases()[0].id().to_string());
    }

    #[test]
    fn display_name_prefers_own_labels() {
        let phase = Phase::new(
            label("Foundation Work"),
            label("أعمال الأساسات"),
            Status::Completed,
            1,
        );

        assert_eq!(phase.display_name(Language::En, &[]), "Foundation Work");
        assert_eq!(phase.display_name(Language::Ar, &[]), "أعمال الأساسات");
    }

    #[test]
    fn display_name_falls_back_to_english_label() {
        let phase =
            Phase::new(label("Finishing"), Label::empty(), Status::Upcoming, 1);

        assert_eq!(phase.display_name(Language::Ar, &[]), "Finishing");
    }

    #[test]
    fn display_name_resolves_legacy_master_phase() {
        let masters = [MasterPhase {
            id: MasterId::new("excavation"),
            name: Bilingual::new(
                Name::new("Excavation").unwrap(),
                Some(Name::new("الحفر").unwrap()),
            ),
            description: Bilingual::new(Description::new("").unwrap(), None),
            typical_duration_days: Some(30),
            display_order: 1,
            is_active: true,
        }];
        let legacy =
            Phase::new(label("excavation"), Label::empty(), Status::Upcoming, 1);

        assert_eq!(legacy.display_name(Language::En, &masters), "Excavation");
        assert_eq!(legacy.display_name(Language::Ar, &masters), "الحفر");

        let free_text =
            Phase::new(label("Roofing"), Label::empty(), Status::Upcoming, 2);
        assert_eq!(free_text.display_name(Language::Ar, &masters), "Roofing");
    }
}
