//! [`Command`] for editing a [`Timeline`] of a [`Building`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        building::{
            self,
            timeline::{Edit, EditError},
            Timeline,
        },
        Building,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for applying a single [`Edit`] to a [`Timeline`] of a
/// [`Building`].
#[derive(Clone, Debug)]
pub struct EditBuildingTimeline {
    /// ID of the [`Building`] whose [`Timeline`] is edited.
    pub building_id: building::Id,

    /// [`Edit`] to apply.
    pub edit: Edit,
}

impl<Db> Command<EditBuildingTimeline> for Service<Db>
where
    Db: Database<
            Select<By<Option<Building>, building::Id>>,
            Ok = Option<Building>,
            Err = Traced<database::Error>,
        > + Database<Update<Building>, Err = Traced<database::Error>>,
{
    type Ok = Building;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: EditBuildingTimeline,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditBuildingTimeline { building_id, edit } = cmd;

        let mut building = self
            .database()
            .execute(Select(By::new(building_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BuildingNotExists(building_id))
            .map_err(tracerr::wrap!())?;

        building.timeline = building
            .timeline
            .apply(edit)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        building.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(building.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(building)
    }
}

/// Error of [`EditBuildingTimeline`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Building`] with the provided ID does not exist.
    #[display("`Building(id: {_0})` does not exist")]
    #[from(ignore)]
    BuildingNotExists(#[error(not(source))] building::Id),

    /// [`Edit`] cannot be applied to the current [`Timeline`].
    #[display("Cannot edit `Timeline`: {_0}")]
    Edit(EditError),
}
