//! Sample data seeding. Overwrites all four collections.

use anyhow::Result;

use gradtrack_engine::hash_secret;
use gradtrack_store::{Gateway, JsonStore};
use gradtrack_types::{Course, Role, User};

pub fn run(store: &JsonStore) -> Result<()> {
    let users = vec![
        user("prof101", "Dr. Akbari", Role::Professor, "pass123"),
        user("prof102", "Dr. Salehi", Role::Professor, "pass456"),
        user("stu981001", "Maryam Rezaei", Role::Student, "student1"),
        user("stu981002", "Ali Mohammadi", Role::Student, "student2"),
        user("stu981003", "Zahra Hosseini", Role::Student, "student3"),
    ];
    let courses = vec![
        course(
            "CRS01",
            "Thesis - Artificial Intelligence",
            "prof101",
            "first semester",
            3,
            "IEEE papers",
            10,
        ),
        course(
            "CRS02",
            "Thesis - Computer Networks",
            "prof102",
            "first semester",
            2,
            "Networking reference book",
            10,
        ),
        course(
            "CRS03",
            "Thesis - Image Processing",
            "prof101",
            "second semester",
            2,
            "Gonzalez textbook",
            12,
        ),
    ];

    store.save_users(&users)?;
    store.save_courses(&courses)?;
    store.save_proposals(&[])?;
    store.save_theses(&[])?;

    println!("Seeded {} users and {} courses.", users.len(), courses.len());
    Ok(())
}

fn user(id: &str, name: &str, role: Role, password: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        role,
        password_hash: hash_secret(password),
    }
}

fn course(
    id: &str,
    title: &str,
    professor_id: &str,
    semester: &str,
    capacity: u32,
    resources: &str,
    sessions: u32,
) -> Course {
    Course {
        id: id.into(),
        title: title.into(),
        professor_id: professor_id.into(),
        year: 1404,
        semester: semester.into(),
        capacity,
        resources: resources.into(),
        sessions,
        credits: 6,
    }
}
