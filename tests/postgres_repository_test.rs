//! Runs against a real database when `DATABASE_URL` is set; otherwise each
//! test returns early.

use job_board_backend::{
    database::pool::create_pool,
    error::Error,
    models::{job::NewJob, recruiter::NewRecruiter, seeker::NewSeeker},
    repository::Repositories,
    utils::time,
};
use uuid::Uuid;

async fn repos() -> Option<Repositories> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = create_pool(&url, 5).await.expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Some(Repositories::postgres(pool))
}

async fn seed(repos: &Repositories) -> (i64, i64, i64) {
    let tag = Uuid::new_v4();
    let recruiter = repos
        .recruiters
        .insert(NewRecruiter {
            name: "Rita".into(),
            email: format!("rita_{}@example.com", tag),
            password_hash: "x".into(),
        })
        .await
        .expect("recruiter");
    let seeker = repos
        .seekers
        .insert(NewSeeker {
            name: "Sam".into(),
            email: format!("sam_{}@example.com", tag),
            password_hash: "x".into(),
        })
        .await
        .expect("seeker");
    let job = repos
        .jobs
        .insert(NewJob {
            recruiter_id: recruiter.id,
            title: "Rust Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            description: Some("Async services".into()),
            salary_range: None,
            job_type: Some("Full-time".into()),
            experience_level: None,
            posted_date: time::today(),
        })
        .await
        .expect("job");
    (recruiter.id, seeker.id, job.id)
}

#[tokio::test]
async fn unique_pairs_surface_as_conflicts() {
    let Some(repos) = repos().await else {
        return;
    };
    let (_, seeker_id, job_id) = seed(&repos).await;

    repos
        .saved_jobs
        .insert(job_id, seeker_id, time::now())
        .await
        .expect("first save");
    let err = repos
        .saved_jobs
        .insert(job_id, seeker_id, time::now())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let removed = repos
        .saved_jobs
        .delete_by_job_id_and_seeker_id(job_id, seeker_id)
        .await
        .expect("unsave");
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn write_tx_rolls_back_on_drop() {
    let Some(repos) = repos().await else {
        return;
    };
    let (recruiter_id, _, job_id) = seed(&repos).await;

    {
        let mut tx = repos.unit_of_work.begin().await.expect("begin");
        assert_eq!(
            tx.job_ids_by_recruiter(recruiter_id).await.expect("lock"),
            vec![job_id]
        );
        assert_eq!(tx.delete_job(job_id).await.expect("delete"), 1);
    }

    assert!(repos.jobs.find_by_id(job_id).await.expect("find").is_some());
}
