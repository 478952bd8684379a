use std::io::{Read, Write};

use evalbot_models::{Repository, ReviewCandidate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{DatabaseError, DbService, Result};

#[derive(Debug, Serialize, Deserialize)]
struct ExchangeData {
    repositories: Vec<Repository>,
    reviews: Vec<ReviewCandidate>,
}

pub struct Exchanger;

impl Exchanger {
    pub async fn export_to_json<W: Write + ?Sized>(
        db_service: &dyn DbService,
        writer: &mut W,
    ) -> Result<()> {
        let data = ExchangeData {
            repositories: db_service.repositories_all().await?,
            reviews: db_service
                .reviews_all()
                .await?
                .iter()
                .map(|r| r.to_candidate())
                .collect(),
        };

        serde_json::to_writer_pretty(writer, &data).map_err(|e| {
            DatabaseError::ExchangeJsonError {
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    /// Import repositories and merge reviews.
    ///
    /// The whole file is parsed and validated, repositories and reviews,
    /// before anything is written.
    pub async fn import_from_json<R: Read>(db_service: &dyn DbService, reader: R) -> Result<usize> {
        let data: ExchangeData =
            serde_json::from_reader(reader).map_err(|e| DatabaseError::ExchangeJsonError {
                message: e.to_string(),
            })?;

        for repository in &data.repositories {
            repository.path()?;
        }
        for review in &data.reviews {
            review.validate()?;
        }

        for repository in data.repositories {
            if db_service
                .repositories_get(&repository.repo_name)
                .await?
                .is_none()
            {
                info!(
                    repo_name = repository.repo_name,
                    message = "Importing repository"
                );
                db_service.repositories_create(repository).await?;
            }
        }

        info!(count = data.reviews.len(), message = "Importing reviews");
        db_service.reviews_upsert(data.reviews).await
    }
}
