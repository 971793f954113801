//! Fixed demo dataset loaded by [`DomainStore::reset`](crate::DomainStore::reset).
//!
//! Three users (Alice, Bob, Charlie), eight goals, and eight reward tokens,
//! four of them listed on the marketplace. Identifiers are constants so
//! that every reset yields the same ids; timestamps are relative to the
//! reset instant. Image references are drawn from the reward pools.

use chrono::{DateTime, TimeDelta, Utc};
use goalforge_types::{Goal, GoalId, GoalStatus, Rarity, Token, TokenId, User, UserId};
use rand::Rng;

use crate::config::RewardConfig;
use crate::rewards::pick_image;
use crate::store::Tables;

/// Alice (`0xAlice123`): tokens 1, 2, 5, 6, 7.
pub const ALICE: UserId = UserId::from_u128(0x0001_0001);
/// Bob (`0xBob456`): tokens 3, 8.
pub const BOB: UserId = UserId::from_u128(0x0001_0002);
/// Charlie (`0xCharlie789`): token 4.
pub const CHARLIE: UserId = UserId::from_u128(0x0001_0003);

/// Alice: "Run a 5K" (completed).
pub const GOAL_1: GoalId = GoalId::from_u128(0x0002_0001);
/// Alice: "Read 10 Books" (active).
pub const GOAL_2: GoalId = GoalId::from_u128(0x0002_0002);
/// Bob: "Learn Guitar" (active).
pub const GOAL_3: GoalId = GoalId::from_u128(0x0002_0003);
/// Alice: "Learn to Cook a New Dish" (completed).
pub const GOAL_5: GoalId = GoalId::from_u128(0x0002_0005);
/// Alice: "Build a Portfolio Website" (completed).
pub const GOAL_6: GoalId = GoalId::from_u128(0x0002_0006);
/// Alice: "Daily Meditation" (active).
pub const GOAL_7: GoalId = GoalId::from_u128(0x0002_0007);
/// Bob: "Finish a Painting" (completed).
pub const GOAL_8: GoalId = GoalId::from_u128(0x0002_0008);
/// Bob: "Organize Garage" (active).
pub const GOAL_9: GoalId = GoalId::from_u128(0x0002_0009);

/// Origin of pre-seeded tokens not tied to a tracked goal. Not in the goal table.
pub const GOAL_GENERIC: GoalId = GoalId::from_u128(0x0002_0100);
/// Second untracked origin goal.
pub const GOAL_GENERIC_2: GoalId = GoalId::from_u128(0x0002_0101);
/// Third untracked origin goal.
pub const GOAL_GENERIC_3: GoalId = GoalId::from_u128(0x0002_0102);

/// Epic Finisher Medal (Alice, listed).
pub const TOKEN_1: TokenId = TokenId::from_u128(0x0003_0001);
/// Rune of Persistence (Alice).
pub const TOKEN_2: TokenId = TokenId::from_u128(0x0003_0002);
/// Bard's Lute (Bob, listed).
pub const TOKEN_3: TokenId = TokenId::from_u128(0x0003_0003);
/// The Worldforger's Hammer (Charlie, listed).
pub const TOKEN_4: TokenId = TokenId::from_u128(0x0003_0004);
/// Chef's Spoon of Plenty (Alice, listed).
pub const TOKEN_5: TokenId = TokenId::from_u128(0x0003_0005);
/// The Architect's Key (Alice).
pub const TOKEN_6: TokenId = TokenId::from_u128(0x0003_0006);
/// Spark of Diligence (Alice).
pub const TOKEN_7: TokenId = TokenId::from_u128(0x0003_0007);
/// Painter's Perfect Prism (Bob).
pub const TOKEN_8: TokenId = TokenId::from_u128(0x0003_0008);

/// `now` minus `days`, saturating at `now`.
fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now.checked_sub_signed(TimeDelta::days(days)).unwrap_or(now)
}

fn user(id: UserId, wallet: &str, created_at: DateTime<Utc>, nfts: &[TokenId]) -> User {
    User {
        id,
        wallet_address: wallet.to_owned(),
        username: None,
        created_at,
        nfts: nfts.to_vec(),
    }
}

struct GoalRow<'a> {
    id: GoalId,
    owner: UserId,
    title: &'a str,
    description: &'a str,
    created_days_ago: i64,
    completed_days_ago: Option<i64>,
}

struct TokenRow<'a> {
    id: TokenId,
    owner: UserId,
    goal: GoalId,
    name: &'a str,
    description: &'a str,
    rarity: Rarity,
    listed: bool,
    minted_days_ago: i64,
}

const GOALS: [GoalRow<'static>; 8] = [
    GoalRow {
        id: GOAL_1,
        owner: ALICE,
        title: "Run a 5K",
        description: "Train for and complete a 5-kilometer run.",
        created_days_ago: 28,
        completed_days_ago: Some(25),
    },
    GoalRow {
        id: GOAL_2,
        owner: ALICE,
        title: "Read 10 Books",
        description: "Finish reading 10 books from my 'to-read' list.",
        created_days_ago: 20,
        completed_days_ago: None,
    },
    GoalRow {
        id: GOAL_5,
        owner: ALICE,
        title: "Learn to Cook a New Dish",
        description: "Master the art of making sourdough bread.",
        created_days_ago: 18,
        completed_days_ago: Some(15),
    },
    GoalRow {
        id: GOAL_6,
        owner: ALICE,
        title: "Build a Portfolio Website",
        description: "Code and deploy a personal portfolio.",
        created_days_ago: 12,
        completed_days_ago: Some(7),
    },
    GoalRow {
        id: GOAL_7,
        owner: ALICE,
        title: "Daily Meditation",
        description: "Meditate for 15 minutes every morning for a month.",
        created_days_ago: 3,
        completed_days_ago: None,
    },
    GoalRow {
        id: GOAL_3,
        owner: BOB,
        title: "Learn Guitar",
        description: "Practice guitar for 30 minutes every day.",
        created_days_ago: 24,
        completed_days_ago: None,
    },
    GoalRow {
        id: GOAL_8,
        owner: BOB,
        title: "Finish a Painting",
        description: "Complete the oil painting of the mountain landscape.",
        created_days_ago: 14,
        completed_days_ago: Some(10),
    },
    GoalRow {
        id: GOAL_9,
        owner: BOB,
        title: "Organize Garage",
        description: "Clean out and organize the entire garage.",
        created_days_ago: 2,
        completed_days_ago: None,
    },
];

const TOKENS: [TokenRow<'static>; 8] = [
    TokenRow {
        id: TOKEN_1,
        owner: ALICE,
        goal: GOAL_1,
        name: "Epic Finisher Medal",
        description: "Awarded for completing the 5K run.",
        rarity: Rarity::Epic,
        listed: true,
        minted_days_ago: 25,
    },
    TokenRow {
        id: TOKEN_2,
        owner: ALICE,
        goal: GOAL_GENERIC,
        name: "Rune of Persistence",
        description: "A token of your continued progress.",
        rarity: Rarity::Common,
        listed: false,
        minted_days_ago: 22,
    },
    TokenRow {
        id: TOKEN_5,
        owner: ALICE,
        goal: GOAL_5,
        name: "Chef's Spoon of Plenty",
        description: "For mastering a new culinary skill.",
        rarity: Rarity::Rare,
        listed: true,
        minted_days_ago: 15,
    },
    TokenRow {
        id: TOKEN_6,
        owner: ALICE,
        goal: GOAL_6,
        name: "The Architect's Key",
        description: "Proof of creation in the digital realm.",
        rarity: Rarity::Epic,
        listed: false,
        minted_days_ago: 7,
    },
    TokenRow {
        id: TOKEN_7,
        owner: ALICE,
        goal: GOAL_GENERIC,
        name: "Spark of Diligence",
        description: "Another step on the long journey.",
        rarity: Rarity::Common,
        listed: false,
        minted_days_ago: 5,
    },
    TokenRow {
        id: TOKEN_3,
        owner: BOB,
        goal: GOAL_GENERIC_2,
        name: "Bard's Lute",
        description: "For the dedication to learning a new instrument.",
        rarity: Rarity::Rare,
        listed: true,
        minted_days_ago: 20,
    },
    TokenRow {
        id: TOKEN_8,
        owner: BOB,
        goal: GOAL_8,
        name: "Painter's Perfect Prism",
        description: "For bringing color and life to the canvas.",
        rarity: Rarity::Rare,
        listed: false,
        minted_days_ago: 10,
    },
    TokenRow {
        id: TOKEN_4,
        owner: CHARLIE,
        goal: GOAL_GENERIC_3,
        name: "The Worldforger's Hammer",
        description: "A testament to true mastery and creation.",
        rarity: Rarity::Legendary,
        listed: true,
        minted_days_ago: 14,
    },
];

/// Build the seed tables relative to `now`.
pub fn seed_tables(now: DateTime<Utc>, rewards: &RewardConfig, rng: &mut impl Rng) -> Tables {
    let mut tables = Tables::default();

    for u in [
        user(
            ALICE,
            "0xAlice123",
            days_ago(now, 30),
            &[TOKEN_1, TOKEN_2, TOKEN_5, TOKEN_6, TOKEN_7],
        ),
        user(BOB, "0xBob456", days_ago(now, 25), &[TOKEN_3, TOKEN_8]),
        user(CHARLIE, "0xCharlie789", days_ago(now, 15), &[TOKEN_4]),
    ] {
        tables.users.insert(u.id, u);
    }

    for row in &GOALS {
        let status = if row.completed_days_ago.is_some() {
            GoalStatus::Completed
        } else {
            GoalStatus::Active
        };
        tables.goals.insert(
            row.id,
            Goal {
                id: row.id,
                user_id: row.owner,
                title: row.title.to_owned(),
                description: row.description.to_owned(),
                status,
                created_at: days_ago(now, row.created_days_ago),
                completed_at: row.completed_days_ago.map(|d| days_ago(now, d)),
            },
        );
    }

    for row in &TOKENS {
        tables.tokens.insert(
            row.id,
            Token {
                id: row.id,
                owner: row.owner,
                goal_id: row.goal,
                name: row.name.to_owned(),
                description: row.description.to_owned(),
                rarity: row.rarity,
                image_url: pick_image(rewards, row.rarity, rng),
                listed: row.listed,
                created_at: days_ago(now, row.minted_days_ago),
            },
        );
    }

    tables
}
