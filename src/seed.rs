// 教室种子数据，`enrollment-backend seed` 子命令使用

use sqlx::PgPool;

const SEED_IMAGE_URL: &str = "/assets/imgs/classroom.jpg";

const SEED_CLASSROOMS: &[(&str, &str, i32)] = &[
    (
        "Classroom A101",
        "Main lecture hall with projector and sound system. Suitable for large group lectures.",
        50,
    ),
    (
        "Classroom A102",
        "Standard classroom with whiteboard and multimedia equipment. Ideal for regular classes.",
        30,
    ),
    (
        "Lab B205",
        "Computer laboratory with 40 workstations. Equipped with latest software and high-speed internet.",
        40,
    ),
    (
        "Classroom C301",
        "Medium-sized classroom with interactive smart board. Perfect for discussion-based classes.",
        25,
    ),
    (
        "Lab B206",
        "Engineering laboratory with specialized equipment for practical experiments.",
        20,
    ),
    (
        "Conference Room D401",
        "Large conference room with video conferencing facilities. Suitable for presentations and seminars.",
        60,
    ),
    (
        "Classroom E201",
        "Small seminar room with round-table setup. Ideal for group discussions and workshops.",
        15,
    ),
    (
        "Studio F101",
        "Multimedia studio with professional recording equipment. Used for video production and media classes.",
        12,
    ),
    (
        "Classroom A201",
        "Standard classroom with modern teaching aids. Equipped with document camera and projector.",
        35,
    ),
    (
        "Lab C402",
        "Chemistry laboratory with fume hoods and safety equipment. Designed for science experiments.",
        24,
    ),
];

/// 向空表写入演示教室，返回插入行数；表里已有数据则什么都不做
pub async fn seed_classrooms(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM classrooms")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!("Classrooms table already has {} rows, skipping seed", existing);
        return Ok(0);
    }

    let mut inserted = 0u64;
    for (name, description, capacity) in SEED_CLASSROOMS {
        let done = sqlx::query(
            r#"
            INSERT INTO classrooms (classroom_name, description, capacity, image_url, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(capacity)
        .bind(SEED_IMAGE_URL)
        .execute(pool)
        .await?;

        inserted += done.rows_affected();
    }

    Ok(inserted)
}
