use super::{CaptchaSolver, Ehall};
use crate::{
    cache,
    error::{ErrorKind, Result},
    model::{CourseRecord, CourseRow},
    request::{EhallApi, EnterStep, Step},
};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

impl<A: EhallApi, S: CaptchaSolver> Ehall<A, S> {
    /// Returns the whole course catalog.
    ///
    /// An existing file at `cache_path` is returned as is. Otherwise the
    /// catalog is scraped page by page and written there once at the end; a
    /// failed scrape leaves no file behind.
    pub async fn get_catalog(&self, cache_path: &Path) -> Result<Vec<CourseRecord>> {
        if cache_path.is_file() {
            let courses = cache::load(cache_path)?;
            info!(path = %cache_path.display(), courses = courses.len(), "catalog loaded from cache");
            return Ok(courses);
        }

        self.try_login()
            .await
            .map_err(|e| ErrorKind::Fatal(format!("Ehall 登录失败! {e}")))?;
        self.enter_course_query()
            .await
            .map_err(|e| ErrorKind::Fatal(format!("进入课程查询界面失败! {e}")))?;

        let page_size = self.config.page_size;
        let pages = self.config.page_count();
        let mut courses = Vec::new();
        for page in 1..=pages {
            let batch = self.get_batch(page_size, page).await?;
            info!(page, pages, rows = batch.len(), "batch fetched");
            courses.extend(batch);
        }
        if courses.len() != self.config.total_records as usize {
            warn!(
                expected = self.config.total_records,
                fetched = courses.len(),
                "catalog size differs from total_records"
            );
        }

        cache::store(cache_path, &courses)?;
        info!(path = %cache_path.display(), courses = courses.len(), "catalog cached");
        Ok(courses)
    }

    /// Sends the priming requests of the course query app in order.
    pub async fn enter_course_query(&self) -> Result<()> {
        for step in EnterStep::ALL {
            self.api.enter_app(step).await?;
        }
        Ok(())
    }

    async fn get_batch(&self, page_size: u32, page_number: u32) -> Result<Vec<CourseRecord>> {
        let mut resp = self.api.query_courses(page_size, page_number).await?;
        let rows = match resp.pointer_mut("/datas/kcxxcx/rows").map(Value::take) {
            Some(rows @ Value::Array(_)) => rows,
            _ => {
                return Err(ErrorKind::MissingField {
                    step: Step::QueryPage(page_number),
                    field: "datas.kcxxcx.rows",
                }
                .into());
            }
        };

        let rows: Vec<CourseRow> = serde_json::from_value(rows)?;
        Ok(rows.into_iter().map(CourseRecord::from).collect())
    }
}
