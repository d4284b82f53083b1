//! Populates the store with mock users and posts through the same creation
//! interface the API uses. Run with: cargo run --bin seed

use chrono::{DateTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use social_network_api::config::Config;
use social_network_api::db::create_mongodb_client;
use social_network_api::models::{CreatePostRequest, CreateUserRequest};
use social_network_api::store::{PostStore, UserStore};
use std::collections::HashMap;

const NAMES: &[&str] = &[
    "Jack", "Mike", "Michael", "Aiden", "Derrek", "Amanda", "Dina", "Barry", "Leon", "Brock",
    "Darren", "Thomas", "Tom", "Guy", "Borja", "Ito", "Morris", "Benjamin", "Ben", "Adam",
    "Samuel", "Sam", "Terry", "Mark", "Kirk", "Synthia", "Ashley", "Lia", "Maria", "Diana",
    "Helga", "Beatrice", "Mary", "Connie",
];

const SURNAMES: &[&str] = &[
    "Downes", "Marques", "Johnson", "Alba", "Davies", "Morris", "Bradley", "Angelo", "Cox",
    "Dawn", "Cruz", "Schmidt", "Casey", "Lesnar", "Orton", "Hamilton", "Jefferson", "Peterson",
    "Thompson", "Sparrow", "Beau", "Coman", "Rashford", "Rutherford", "Buxton", "Ruiz", "Draper",
    "Cole", "Palmer", "Terrence",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "veniam", "quis",
    "nostrud", "exercitation", "ullamco",
];

const USER_COUNT: usize = 100;
const FRIENDS_PER_USER: usize = 5;

struct MockUser {
    username: String,
    full_name: String,
    active: bool,
    email: String,
    created_on: DateTime<Utc>,
    friends: Vec<String>,
}

fn random_timestamp(rng: &mut impl Rng) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(
        rng.gen_range(2018..=2025),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
        rng.gen_range(0..=23),
        rng.gen_range(0..=59),
        rng.gen_range(0..=59),
    )
    .single()
    .expect("generated date is always valid")
}

fn random_sentence(rng: &mut impl Rng) -> String {
    let length = rng.gen_range(5..=12);
    let words: Vec<&str> = (0..length)
        .map(|_| *WORDS.choose(rng).expect("word pool is not empty"))
        .collect();
    format!("{}.", words.join(" "))
}

fn create_mock_users(rng: &mut impl Rng) -> Vec<MockUser> {
    let mut users: Vec<MockUser> = Vec::with_capacity(USER_COUNT);

    for _ in 0..USER_COUNT {
        let name = NAMES.choose(rng).expect("name pool is not empty");
        let surname = SURNAMES.choose(rng).expect("surname pool is not empty");

        // Deduplicate by suffixing with the number of existing collisions.
        let base = format!("{}{}", name, surname);
        let collisions = users.iter().filter(|u| u.username.contains(&base)).count();
        let username = if collisions > 0 {
            format!("{}{}", base, collisions)
        } else {
            base
        };

        users.push(MockUser {
            full_name: format!("{} {}", name, surname),
            email: format!("{}@example.com", username),
            username,
            active: rng.gen_bool(0.5),
            created_on: random_timestamp(rng),
            friends: Vec::new(),
        });
    }

    fill_friends(&mut users, rng);
    users
}

/// Gives every user a handful of random friends, recorded on both sides.
fn fill_friends(users: &mut [MockUser], rng: &mut impl Rng) {
    let usernames: Vec<String> = users.iter().map(|u| u.username.clone()).collect();
    let index: HashMap<String, usize> = usernames
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();

    for i in 0..users.len() {
        let me = users[i].username.clone();
        let candidates: Vec<String> = usernames
            .iter()
            .filter(|name| **name != me && !users[i].friends.contains(*name))
            .cloned()
            .collect();

        for friend in candidates.choose_multiple(rng, FRIENDS_PER_USER) {
            users[i].friends.push(friend.clone());
            if let Some(&j) = index.get(friend) {
                users[j].friends.push(me.clone());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;
    let db = create_mongodb_client(&config).await?;
    let user_store = UserStore::new(&db);
    let post_store = PostStore::new(&db);

    let mut rng = rand::thread_rng();
    let users = create_mock_users(&mut rng);

    log::info!("Seeding {} users", users.len());
    for user in &users {
        let request = CreateUserRequest {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            active: user.active,
            email: user.email.clone(),
            created_on: Some(user.created_on),
            friends: user.friends.clone(),
        };
        if let Err(err) = user_store.create(request).await {
            log::warn!("Skipping user {}: {}", user.username, err);
        }
    }

    let mut post_total = 0;
    for user in &users {
        for _ in 0..rng.gen_range(1..=10) {
            let request = CreatePostRequest {
                username: user.username.clone(),
                content: random_sentence(&mut rng),
                date: Some(random_timestamp(&mut rng)),
                likes: rng.gen_range(0..=50_000),
                comment_count: rng.gen_range(0..=10_000),
            };
            if let Err(err) = post_store.create(request).await {
                log::warn!("Skipping post for {}: {}", user.username, err);
            } else {
                post_total += 1;
            }
        }
    }

    log::info!("Seeded {} users and {} posts", users.len(), post_total);
    Ok(())
}
