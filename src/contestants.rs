use serde::{Deserialize, Serialize};

/// Roster entry shown on the page. Votes are tallied by the external payment
/// providers; nothing in this backend mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestantRecord {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub location: String,
    pub bio: String,
    pub votes: u32,
    pub image_url: String,
    pub stream_url: String,
    pub eliminated: bool,
}

struct Seed(u32, &'static str, u8, &'static str, &'static str, u32, &'static str, &'static str, bool);

const ROSTER: &[Seed] = &[
    Seed(
        1,
        "Adebola Johnson",
        25,
        "Lagos",
        "Content creator and aspiring actor with a passion for storytelling.",
        245,
        "https://images.unsplash.com/photo-1522327646852-4e28586a40dd",
        "https://www.youtube.com/watch?v=example1",
        false,
    ),
    Seed(
        2,
        "Chioma Okafor",
        23,
        "Abuja",
        "Fashion designer and lifestyle vlogger sharing Nigerian culture.",
        312,
        "https://images.unsplash.com/photo-1659540517934-cba43fc64ded",
        "https://www.youtube.com/watch?v=example2",
        false,
    ),
    Seed(
        3,
        "Emeka Nwosu",
        28,
        "Port Harcourt",
        "Music producer who loves to create fusion of afrobeats and jazz.",
        189,
        "https://images.unsplash.com/photo-1589707181684-24a34853641d",
        "",
        false,
    ),
    Seed(
        4,
        "Folake Ade",
        24,
        "Ibadan",
        "Dancer and choreographer with unique Afro-contemporary moves.",
        278,
        "https://images.unsplash.com/photo-1659540517163-e9a29f4d1251",
        "https://www.youtube.com/watch?v=example4",
        false,
    ),
    Seed(
        5,
        "Tunde Bakare",
        26,
        "Kano",
        "Tech enthusiast and gaming streamer building a Nigerian gaming community.",
        201,
        "https://images.unsplash.com/photo-1495434942214-9b525bba74e9",
        "https://www.twitch.tv/example5",
        false,
    ),
    Seed(
        6,
        "Ngozi Eze",
        22,
        "Enugu",
        "Makeup artist and beauty influencer creating unique Nigerian looks.",
        267,
        "https://images.unsplash.com/photo-1523365280197-f1783db9fe62",
        "",
        false,
    ),
    Seed(
        7,
        "Ibrahim Yusuf",
        27,
        "Kaduna",
        "Stand-up comedian bringing laughter and social commentary.",
        234,
        "https://images.unsplash.com/photo-1528820184586-dd0d858b7254",
        "https://www.youtube.com/watch?v=example7",
        false,
    ),
    Seed(
        8,
        "Amara Obi",
        25,
        "Owerri",
        "Culinary enthusiast showcasing modern Nigerian cuisine.",
        156,
        "https://images.unsplash.com/photo-1632215861513-130b66fe97f4",
        "",
        true,
    ),
    Seed(
        9,
        "Dayo Adeleke",
        29,
        "Abeokuta",
        "Fitness trainer promoting healthy living with African exercises.",
        198,
        "https://images.unsplash.com/photo-1543234723-b70b104d8e25",
        "https://www.youtube.com/watch?v=example9",
        true,
    ),
    Seed(
        10,
        "Fatima Bello",
        24,
        "Sokoto",
        "Traditional storyteller bringing Nigerian folklore to modern audiences.",
        222,
        "https://images.unsplash.com/photo-1539414785349-55cfff23f5b9",
        "https://www.youtube.com/watch?v=example10",
        false,
    ),
];

/// Built-in roster, used to seed an empty store and to serve the page when
/// the store is unreachable.
pub fn seed_roster() -> Vec<ContestantRecord> {
    ROSTER
        .iter()
        .map(|s| ContestantRecord {
            id: s.0,
            name: s.1.to_string(),
            age: s.2,
            location: s.3.to_string(),
            bio: s.4.to_string(),
            votes: s.5,
            image_url: s.6.to_string(),
            stream_url: s.7.to_string(),
            eliminated: s.8,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_ids_are_unique_and_ordered() {
        let ids: Vec<u32> = seed_roster().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn roster_marks_two_eliminations() {
        let eliminated = seed_roster().iter().filter(|c| c.eliminated).count();
        assert_eq!(eliminated, 2);
    }
}
