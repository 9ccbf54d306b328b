//! Demo dataset
//!
//! The backend seeds first-run deployments with a small marketplace:
//! three demo accounts (one per role), an event catalog, vendor cards,
//! dashboard aggregates, one confirmed booking with its contract, a
//! conversation, services, packages, reviews, and portfolios. Seeding is
//! idempotent; collections that already exist are left alone.

use eventide_core::records::*;
use eventide_core::types::UserRole;
use std::collections::HashMap;

/// Fixed id of the demo client account
pub const DEMO_CLIENT_ID: &str = "user-demo-client";
/// Fixed id of the demo vendor account
pub const DEMO_VENDOR_ID: &str = "user-demo-vendor";
/// Fixed id of the demo planner account
pub const DEMO_PLANNER_ID: &str = "user-demo-planner";
/// Id of the seeded booking shared by the demo client and vendor
pub const SEED_BOOKING_ID: &str = "booking-seed-1";
/// Id of the seeded conversation between the demo client and vendor
pub const SEED_CONVERSATION_ID: &str = "conv-seed-1";

fn avatar(seed: &str) -> String {
    format!("https://i.pravatar.cc/150?u={seed}")
}

fn image(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/800/600")
}

/// The identity a demo deployment signs in when the provider is down
pub fn demo_user(role: UserRole) -> User {
    let (id, name, email) = match role {
        UserRole::Client => (DEMO_CLIENT_ID, "Demo Client", "client@demo.eventide.app"),
        UserRole::Vendor => (DEMO_VENDOR_ID, "Demo Vendor", "vendor@demo.eventide.app"),
        UserRole::Planner => (DEMO_PLANNER_ID, "Demo Planner", "planner@demo.eventide.app"),
        UserRole::Admin => ("user-demo-admin", "Demo Admin", "admin@demo.eventide.app"),
    };
    User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        avatar: avatar(id),
        email: Some(email.to_string()),
        password: None,
        interests: vec![],
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        provider_profile: None,
    }
}

pub fn users() -> Vec<User> {
    let mut client = demo_user(UserRole::Client);
    client.password = Some("password".to_string());
    client.interests = vec!["Music".to_string(), "Food".to_string()];

    let mut vendor = demo_user(UserRole::Vendor);
    vendor.password = Some("password".to_string());
    vendor.provider_profile = Some(ProviderProfile {
        provider_id: DEMO_VENDOR_ID.to_string(),
        business_name: Some("Saffron & Sage Catering".to_string()),
        business_description: Some(
            "Full-service catering for weddings and corporate events.".to_string(),
        ),
        city: Some("Mumbai".to_string()),
        price_range: Some("₹₹₹".to_string()),
        verified: true,
        rating: 4.8,
        cover_photo_url: Some(image("saffron-sage")),
        provider_type: UserRole::Vendor,
        kyc_data: None,
    });

    let mut planner = demo_user(UserRole::Planner);
    planner.password = Some("password".to_string());
    planner.provider_profile = Some(ProviderProfile {
        provider_id: DEMO_PLANNER_ID.to_string(),
        business_name: Some("Moonlit Occasions".to_string()),
        business_description: Some("Boutique event planning studio.".to_string()),
        city: Some("Bengaluru".to_string()),
        price_range: Some("₹₹".to_string()),
        verified: true,
        rating: 4.9,
        cover_photo_url: Some(image("moonlit")),
        provider_type: UserRole::Planner,
        kyc_data: None,
    });

    vec![client, vendor, planner]
}

pub fn events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: "event-seed-1".to_string(),
            title: "Sunset Beats Festival".to_string(),
            description: "Open-air electronic music festival by the bay.".to_string(),
            date: "2025-11-15T18:00:00Z".to_string(),
            location: "Marine Drive, Mumbai".to_string(),
            image_url: image("sunset-beats"),
            attendees: 1250,
            category: EventCategory::Music,
            gallery: vec![image("sunset-beats-2"), image("sunset-beats-3")],
            client_id: None,
            planner_id: None,
            organizer_id: Some(DEMO_VENDOR_ID.to_string()),
            status: EventStatus::Confirmed,
            budget: None,
            organizer: "Saffron & Sage Catering".to_string(),
            price: Some("₹1500".to_string()),
            coordinates: Some(Coordinates {
                lat: 18.9438,
                lng: 72.8231,
            }),
            created_at: Some("2025-06-01T09:00:00Z".to_string()),
        },
        EventRecord {
            id: "event-seed-2".to_string(),
            title: "DevConf Bengaluru".to_string(),
            description: "Two days of talks on systems and infrastructure.".to_string(),
            date: "2025-10-03T09:00:00Z".to_string(),
            location: "Whitefield Convention Centre".to_string(),
            image_url: image("devconf"),
            attendees: 800,
            category: EventCategory::Tech,
            gallery: vec![],
            client_id: None,
            planner_id: Some(DEMO_PLANNER_ID.to_string()),
            organizer_id: None,
            status: EventStatus::Planning,
            budget: Some(2_000_000),
            organizer: "Moonlit Occasions".to_string(),
            price: Some("₹4000".to_string()),
            coordinates: Some(Coordinates {
                lat: 12.9698,
                lng: 77.7500,
            }),
            created_at: Some("2025-05-20T10:30:00Z".to_string()),
        },
        EventRecord {
            id: "event-seed-3".to_string(),
            title: "Riverside Wedding Expo".to_string(),
            description: "Meet venues, caterers and photographers in one place.".to_string(),
            date: "2025-12-06T11:00:00Z".to_string(),
            location: "Sabarmati Riverfront, Ahmedabad".to_string(),
            image_url: image("wedding-expo"),
            attendees: 430,
            category: EventCategory::Wedding,
            gallery: vec![image("wedding-expo-2")],
            client_id: Some(DEMO_CLIENT_ID.to_string()),
            planner_id: None,
            organizer_id: None,
            status: EventStatus::Planning,
            budget: Some(500_000),
            organizer: "Demo Client".to_string(),
            price: Some("Free".to_string()),
            coordinates: None,
            created_at: Some("2025-07-11T14:00:00Z".to_string()),
        },
        EventRecord {
            id: "event-seed-4".to_string(),
            title: "Night Market Food Walk".to_string(),
            description: "Guided tasting tour through the old city.".to_string(),
            date: "2025-09-21T19:30:00Z".to_string(),
            location: "Chandni Chowk, Delhi".to_string(),
            image_url: image("food-walk"),
            attendees: 60,
            category: EventCategory::Food,
            gallery: vec![],
            client_id: None,
            planner_id: None,
            organizer_id: Some(DEMO_VENDOR_ID.to_string()),
            status: EventStatus::Confirmed,
            budget: None,
            organizer: "Saffron & Sage Catering".to_string(),
            price: Some("₹900".to_string()),
            coordinates: Some(Coordinates {
                lat: 28.6506,
                lng: 77.2303,
            }),
            created_at: Some("2025-06-28T08:15:00Z".to_string()),
        },
    ]
}

pub fn vendors() -> Vec<VendorCard> {
    vec![
        VendorCard {
            id: DEMO_VENDOR_ID.to_string(),
            name: "Saffron & Sage Catering".to_string(),
            category: "Catering".to_string(),
            rating: 4.8,
            price_range: "₹₹₹".to_string(),
            image_url: image("saffron-sage"),
            verified: true,
            service_count: None,
            event_count: None,
        },
        VendorCard {
            id: "vendor-lumen".to_string(),
            name: "Lumen Photography".to_string(),
            category: "Photography".to_string(),
            rating: 4.6,
            price_range: "₹₹".to_string(),
            image_url: image("lumen"),
            verified: true,
            service_count: None,
            event_count: None,
        },
        VendorCard {
            id: "vendor-aria".to_string(),
            name: "Aria Sound & Light".to_string(),
            category: "Production".to_string(),
            rating: 4.3,
            price_range: "₹₹".to_string(),
            image_url: image("aria"),
            verified: false,
            service_count: None,
            event_count: None,
        },
        VendorCard {
            id: "vendor-fern".to_string(),
            name: "Fern & Petal Decor".to_string(),
            category: "Decor".to_string(),
            rating: 4.7,
            price_range: "₹₹₹".to_string(),
            image_url: image("fern"),
            verified: true,
            service_count: None,
            event_count: None,
        },
    ]
}

pub fn vendor_data() -> VendorData {
    VendorData {
        stats: vec![
            IncomePoint { name: "Mon".to_string(), income: 12_000 },
            IncomePoint { name: "Tue".to_string(), income: 9_500 },
            IncomePoint { name: "Wed".to_string(), income: 15_200 },
            IncomePoint { name: "Thu".to_string(), income: 7_800 },
            IncomePoint { name: "Fri".to_string(), income: 21_400 },
            IncomePoint { name: "Sat".to_string(), income: 32_000 },
            IncomePoint { name: "Sun".to_string(), income: 18_600 },
        ],
        requests: vec![],
        metrics: VendorMetrics {
            bookings: 1,
            revenue: 85_000,
            views: 1_280,
            rating: 4.8,
        },
        availability: vec![],
    }
}

pub fn planner_data() -> PlannerData {
    PlannerData {
        alerts: vec![
            Alert {
                id: "alert-seed-1".to_string(),
                text: "DevConf venue contract signed".to_string(),
                time: "2h ago".to_string(),
                kind: "success".to_string(),
            },
            Alert {
                id: "alert-seed-2".to_string(),
                text: "Caterer quote for DevConf expires tomorrow".to_string(),
                time: "6h ago".to_string(),
                kind: "warning".to_string(),
            },
        ],
    }
}

pub fn client_data() -> ClientData {
    ClientData {
        metrics: vec![
            DashboardMetric {
                name: "Venue".to_string(),
                value: 200_000,
                color: "#8b5cf6".to_string(),
            },
            DashboardMetric {
                name: "Catering".to_string(),
                value: 150_000,
                color: "#ec4899".to_string(),
            },
            DashboardMetric {
                name: "Decor".to_string(),
                value: 80_000,
                color: "#f59e0b".to_string(),
            },
            DashboardMetric {
                name: "Photography".to_string(),
                value: 70_000,
                color: "#10b981".to_string(),
            },
        ],
        tasks: vec![
            Task {
                id: "task-seed-1".to_string(),
                title: "Shortlist wedding venues".to_string(),
                status: TaskStatus::Completed,
                date: "Aug 02".to_string(),
            },
            Task {
                id: "task-seed-2".to_string(),
                title: "Confirm guest list".to_string(),
                status: TaskStatus::Pending,
                date: "Sep 10".to_string(),
            },
            Task {
                id: "task-seed-3".to_string(),
                title: "Taste catering menu".to_string(),
                status: TaskStatus::Pending,
                date: "Sep 18".to_string(),
            },
        ],
        rsvps: HashMap::new(),
    }
}

pub fn bookings() -> Vec<Booking> {
    vec![Booking {
        id: SEED_BOOKING_ID.to_string(),
        event_id: "event-seed-3".to_string(),
        client_id: Some(DEMO_CLIENT_ID.to_string()),
        provider_id: DEMO_VENDOR_ID.to_string(),
        service_id: "service-seed-1".to_string(),
        status: BookingStatus::Confirmed,
        category: Some("Catering".to_string()),
        agreed_price: 85_000,
        scheduled_start: Some("2025-12-06T11:00:00Z".to_string()),
        created_at: Some("2025-07-15T10:00:00Z".to_string()),
    }]
}

pub fn contracts() -> Vec<Contract> {
    vec![Contract {
        id: "contract-seed-1".to_string(),
        booking_id: SEED_BOOKING_ID.to_string(),
        status: ContractStatus::Active,
        clauses: vec![
            ContractClause {
                id: "clause-seed-1".to_string(),
                key: "deliverables".to_string(),
                value: "Buffet service for 120 guests, 3 courses.".to_string(),
                order_index: 0,
            },
            ContractClause {
                id: "clause-seed-2".to_string(),
                key: "payment".to_string(),
                value: "50% advance, balance on event day.".to_string(),
                order_index: 1,
            },
        ],
    }]
}

pub fn conversations() -> Vec<Conversation> {
    vec![Conversation {
        id: SEED_CONVERSATION_ID.to_string(),
        participants: vec![
            Participant {
                id: DEMO_CLIENT_ID.to_string(),
                name: "Demo Client".to_string(),
                avatar: avatar(DEMO_CLIENT_ID),
            },
            Participant {
                id: DEMO_VENDOR_ID.to_string(),
                name: "Saffron & Sage Catering".to_string(),
                avatar: avatar(DEMO_VENDOR_ID),
            },
        ],
        last_message: Some(LastMessage {
            text: "See you at the tasting on Friday!".to_string(),
            timestamp: "2025-08-20T16:42:00Z".to_string(),
            sender_id: DEMO_VENDOR_ID.to_string(),
        }),
        unread_count: 0,
    }]
}

pub fn direct_messages() -> Vec<DirectMessage> {
    vec![
        DirectMessage {
            id: "dm-seed-1".to_string(),
            conversation_id: SEED_CONVERSATION_ID.to_string(),
            sender_id: DEMO_CLIENT_ID.to_string(),
            text: "Could we add a vegan course to the menu?".to_string(),
            timestamp: "2025-08-20T16:30:00Z".to_string(),
            kind: MessageKind::Text,
        },
        DirectMessage {
            id: "dm-seed-2".to_string(),
            conversation_id: SEED_CONVERSATION_ID.to_string(),
            sender_id: DEMO_VENDOR_ID.to_string(),
            text: "See you at the tasting on Friday!".to_string(),
            timestamp: "2025-08-20T16:42:00Z".to_string(),
            kind: MessageKind::Text,
        },
    ]
}

pub fn services() -> HashMap<String, Vec<ServiceOffering>> {
    let mut map = HashMap::new();
    map.insert(
        DEMO_VENDOR_ID.to_string(),
        vec![
            ServiceOffering {
                id: "service-seed-1".to_string(),
                title: "Wedding Buffet".to_string(),
                price: "800/plate".to_string(),
                description: "Multi-cuisine buffet with live counters.".to_string(),
                provider_id: None,
            },
            ServiceOffering {
                id: "service-seed-2".to_string(),
                title: "Corporate Lunch Boxes".to_string(),
                price: "350/box".to_string(),
                description: "Daily deliveries for offices, 50 box minimum.".to_string(),
                provider_id: None,
            },
        ],
    );
    map
}

pub fn packages() -> HashMap<String, Vec<EventPackage>> {
    let mut map = HashMap::new();
    map.insert(
        DEMO_VENDOR_ID.to_string(),
        vec![EventPackage {
            id: "package-seed-1".to_string(),
            name: "Intimate Wedding".to_string(),
            price: "1,50,000".to_string(),
            description: "Catering and decor for up to 80 guests.".to_string(),
            features: "Buffet, live chaat counter, floral decor, service staff".to_string(),
        }],
    );
    map
}

pub fn reviews() -> Vec<Review> {
    vec![
        Review {
            id: "review-seed-1".to_string(),
            provider_id: DEMO_VENDOR_ID.to_string(),
            client_id: "user-riya".to_string(),
            client_name: "Riya Mehta".to_string(),
            client_avatar: avatar("riya"),
            rating: 5,
            text: "The live counters were the highlight of our reception.".to_string(),
            timestamp: "2025-06-14T12:00:00Z".to_string(),
        },
        Review {
            id: "review-seed-2".to_string(),
            provider_id: DEMO_VENDOR_ID.to_string(),
            client_id: "user-arjun".to_string(),
            client_name: "Arjun Patel".to_string(),
            client_avatar: avatar("arjun"),
            rating: 4,
            text: "Great food, setup ran slightly late.".to_string(),
            timestamp: "2025-05-02T18:30:00Z".to_string(),
        },
    ]
}

pub fn portfolios() -> HashMap<String, Vec<PortfolioItem>> {
    let mut map = HashMap::new();
    map.insert(
        DEMO_VENDOR_ID.to_string(),
        vec![
            PortfolioItem {
                id: "portfolio-seed-1".to_string(),
                album_id: "default".to_string(),
                media_type: "Image".to_string(),
                media_url: image("portfolio-1"),
                title: Some("Riverside reception, 120 covers".to_string()),
            },
            PortfolioItem {
                id: "portfolio-seed-2".to_string(),
                album_id: "default".to_string(),
                media_type: "Image".to_string(),
                media_url: image("portfolio-2"),
                title: None,
            },
        ],
    );
    map
}

pub fn projects() -> Vec<Project> {
    vec![Project {
        id: "project-seed-1".to_string(),
        name: "DevConf Bengaluru".to_string(),
        client: "TechCircle Media".to_string(),
        status: "In Progress".to_string(),
        progress: 55,
        date: "Oct 03".to_string(),
    }]
}

pub fn guests() -> Vec<Guest> {
    let entries = [
        ("Neha Sharma", "neha@example.com", GuestStatus::Confirmed, "Table 1", "Family"),
        ("Vikram Rao", "vikram@example.com", GuestStatus::Confirmed, "Table 1", "Family"),
        ("Sana Iqbal", "sana@example.com", GuestStatus::Pending, "-", "Friend"),
        ("Dev Kapoor", "dev@example.com", GuestStatus::Confirmed, "Table 2", "Friend"),
        ("Meera Nair", "meera@example.com", GuestStatus::Declined, "-", "Colleague"),
        ("Rahul Joshi", "rahul@example.com", GuestStatus::Pending, "-", "VIP"),
    ];
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, email, status, table, kind))| Guest {
            id: format!("guest-seed-{}", i + 1),
            name: name.to_string(),
            email: email.to_string(),
            status: *status,
            table: table.to_string(),
            kind: kind.to_string(),
            avatar: avatar(email),
        })
        .collect()
}
