use kih_core::entities::CourseInstitution;
use kih_core::filter::{Criteria, CourseCriteria, price_range_options, program_options};
use kih_core::listing::ListingView;
use kih_db::{DocumentStore, PortalService};
use serde::Serialize;

use super::{DetailView, listing_page};

#[derive(Debug, Serialize)]
pub struct CourseOptions {
    pub programs: Vec<String>,
    pub price_ranges: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseListPage {
    pub heading: &'static str,
    pub search_placeholder: &'static str,
    pub options: CourseOptions,
    pub listing: ListingView<CourseInstitution>,
}

#[derive(Debug, Serialize)]
pub struct CourseDetailPage {
    pub course: DetailView<CourseInstitution>,
}

/// Fetch every course, then narrow by `criteria` in memory.
pub async fn list<S: DocumentStore>(
    service: &PortalService<S>,
    criteria: &CourseCriteria,
    limit: usize,
) -> CourseListPage {
    let fetched = service.list_courses().await;
    let (options, listing) = match fetched {
        Ok(courses) => {
            let options = CourseOptions {
                programs: program_options(&courses),
                price_ranges: price_range_options(&courses),
            };
            let listing = listing_page(criteria.apply(&courses), limit);
            (options, listing)
        }
        Err(err) => (
            CourseOptions {
                programs: program_options(&[]),
                price_ranges: price_range_options(&[]),
            },
            ListingView::Failed {
                message: format!("Gagal memuat data kursus: {err}"),
            },
        ),
    };

    CourseListPage {
        heading: "Lembaga Kursus di Pare",
        search_placeholder: "Cari kursus (nama, deskripsi, alamat)...",
        options,
        listing,
    }
}

pub async fn detail<S: DocumentStore>(service: &PortalService<S>, id: &str) -> CourseDetailPage {
    CourseDetailPage {
        course: DetailView::from_fetch(
            service.get_course(id).await,
            "Lembaga kursus tidak ditemukan.",
            "Gagal memuat data kursus",
        ),
    }
}
