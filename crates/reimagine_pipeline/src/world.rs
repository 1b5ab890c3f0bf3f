//! New-world definition and transformation mapping.

use crate::dna::pretty;
use crate::{Outcome, RetryPolicy, attempt_with_policy, interpret_json, prompts};
use reimagine_core::{FinalDna, Mappings, NewWorld, TransformationMap};
use reimagine_interface::ReimagineDriver;
use tracing::instrument;

/// World definition call site.
pub const WORLD_SITE: &str = "world_definition";
/// Transformation mapping call site.
pub const MAPPING_SITE: &str = "transformation_mapping";

/// Moves story DNA into a user-described world.
pub struct WorldMapper<'a, D: ?Sized> {
    driver: &'a D,
    policy: RetryPolicy,
}

impl<'a, D: ReimagineDriver + ?Sized> WorldMapper<'a, D> {
    /// Mapper calling `driver` under `policy`.
    pub fn new(driver: &'a D, policy: RetryPolicy) -> Self {
        Self { driver, policy }
    }

    /// Design the new world from the source themes and the rendered brief.
    ///
    /// A response is accepted once it names a setting. Falls back to
    /// [`NewWorld::from_brief`], which uses the brief text as the setting.
    #[instrument(skip(self, themes))]
    pub async fn define_world(&self, themes: &[String], brief: &str) -> Outcome<NewWorld> {
        let prompt = prompts::world_definition(&pretty(themes), brief);
        attempt_with_policy(
            self.driver,
            self.policy,
            WORLD_SITE,
            &prompt,
            interpret_json::<NewWorld>,
            |_| NewWorld::from_brief(brief),
        )
        .await
    }

    /// Map characters and conflicts of `dna` into `world`.
    ///
    /// Mappings are accepted only when both character and conflict
    /// mappings carry content. Falls back to [`Mappings::empty`].
    #[instrument(skip_all)]
    pub async fn map_transformation(
        &self,
        dna: &FinalDna,
        world: NewWorld,
    ) -> Outcome<TransformationMap> {
        let prompt = prompts::transformation_mapping(&pretty(dna), &pretty(&world));
        attempt_with_policy(
            self.driver,
            self.policy,
            MAPPING_SITE,
            &prompt,
            interpret_json::<Mappings>,
            |_| Mappings::empty(),
        )
        .await
        .map(|mappings| TransformationMap {
            new_world: world,
            mappings,
        })
    }
}
