//! Built-in catalog entries
//!
//! To publish a new project, append a record here. The catalog page,
//! detail routes, static export, and thumbnail tools all pick it up.

use super::{Category, Project, Stat};

/// The catalog, in display order
pub static PROJECTS: &[Project] = &[
    Project {
        id: "kaggle-airbnb-nyc",
        name: "NYC Airbnb Market Analysis",
        description: "Multi-dimensional analysis of NYC Airbnb listings with interactive visualizations exploring pricing, neighborhoods, and host patterns.",
        url: "https://ericdataplus.github.io/kaggle-airbnb-nyc/",
        repo_url: "https://github.com/Ericdataplus/kaggle-airbnb-nyc",
        category: Category::Kaggle,
        tags: &["airbnb", "nyc", "real-estate", "pricing", "geographic"],
        featured: true,
        data_source: Some("Kaggle"),
        date_added: "2024-01-01",
        key_insight: Some(Stat { value: "$152", label: "Avg Price" }),
        dataset_size: Some(Stat { value: "48K", label: "listings" }),
        thumbnail: None,
    },
    Project {
        id: "kaggle-books-dataset",
        name: "Books Dataset Explorer",
        description: "Interactive analysis of 15K+ books exploring ratings, authors, publishers, and literary trends over time.",
        url: "https://ericdataplus.github.io/kaggle-books-dataset/",
        repo_url: "https://github.com/Ericdataplus/kaggle-books-dataset",
        category: Category::Kaggle,
        tags: &["books", "literature", "ratings", "authors", "publishers"],
        featured: true,
        data_source: Some("Kaggle"),
        date_added: "2024-01-15",
        key_insight: Some(Stat { value: "3.9★", label: "Avg Rating" }),
        dataset_size: Some(Stat { value: "15K", label: "books" }),
        thumbnail: None,
    },
    Project {
        id: "kaggle-laptop-sales",
        name: "Laptop Sales Analysis",
        description: "Deep analysis of 4,400+ Amazon laptop listings examining specs, pricing, brands, and consumer preferences.",
        url: "https://ericdataplus.github.io/kaggle-laptop-sales/",
        repo_url: "https://github.com/Ericdataplus/kaggle-laptop-sales",
        category: Category::Kaggle,
        tags: &["laptops", "amazon", "e-commerce", "pricing", "technology"],
        featured: true,
        data_source: Some("Kaggle"),
        date_added: "2024-02-01",
        key_insight: Some(Stat { value: "$847", label: "Avg Price" }),
        dataset_size: Some(Stat { value: "4.4K", label: "laptops" }),
        thumbnail: None,
    },
    Project {
        id: "credit-card-fraud-detect",
        name: "Credit Card Fraud Detection",
        description: "ML fraud detection achieving 91%+ accuracy with interactive visualizations of model performance and fraud patterns.",
        url: "https://ericdataplus.github.io/credit-card-fraud-detect/",
        repo_url: "https://github.com/Ericdataplus/credit-card-fraud-detect",
        category: Category::MachineLearning,
        tags: &["fraud", "ml", "classification", "finance", "security"],
        featured: true,
        data_source: Some("Kaggle"),
        date_added: "2024-02-15",
        key_insight: Some(Stat { value: "91%", label: "Accuracy" }),
        dataset_size: Some(Stat { value: "284K", label: "transactions" }),
        thumbnail: None,
    },
    Project {
        id: "network-intrusion-detection",
        name: "Network Intrusion Detection",
        description: "AI-powered network intrusion detection system with visualizations of attack patterns and model predictions.",
        url: "https://ericdataplus.github.io/network-intrusion-detection/",
        repo_url: "https://github.com/Ericdataplus/network-intrusion-detection",
        category: Category::Security,
        tags: &["cybersecurity", "intrusion", "network", "ml", "classification"],
        featured: false,
        data_source: Some("Kaggle"),
        date_added: "2024-03-01",
        key_insight: Some(Stat { value: "23", label: "Attack Types" }),
        dataset_size: Some(Stat { value: "125K", label: "connections" }),
        thumbnail: None,
    },
    Project {
        id: "nasa-exoplanet-detection",
        name: "NASA Exoplanet Discovery",
        description: "Exploration of NASA exoplanet data with visualizations of planetary characteristics and detection methods.",
        url: "https://ericdataplus.github.io/nasa-exoplanet-detection/",
        repo_url: "https://github.com/Ericdataplus/nasa-exoplanet-detection",
        category: Category::Space,
        tags: &["nasa", "exoplanets", "astronomy", "space", "kepler"],
        featured: true,
        data_source: Some("NASA"),
        date_added: "2024-03-15",
        key_insight: Some(Stat { value: "5K+", label: "Exoplanets" }),
        dataset_size: Some(Stat { value: "33K", label: "observations" }),
        thumbnail: None,
    },
    Project {
        id: "ariel-atmosphere-kan",
        name: "Ariel Atmosphere Analysis",
        description: "Analysis of atmospheric data related to the Ariel space mission for exoplanet atmosphere characterization.",
        url: "https://ericdataplus.github.io/ariel-atmosphere-kan/",
        repo_url: "https://github.com/Ericdataplus/ariel-atmosphere-kan",
        category: Category::Space,
        tags: &["ariel", "atmosphere", "exoplanets", "spectroscopy"],
        featured: false,
        data_source: Some("ESA/Kaggle"),
        date_added: "2024-04-01",
        key_insight: Some(Stat { value: "1K", label: "Targets" }),
        dataset_size: Some(Stat { value: "52K", label: "spectra" }),
        thumbnail: None,
    },
    Project {
        id: "random-artist-exploration",
        name: "Random Artist Explorer",
        description: "Interactive music data exploration tool for discovering and analyzing artist statistics and trends.",
        url: "https://ericdataplus.github.io/random-artist-exploration/",
        repo_url: "https://github.com/Ericdataplus/random-artist-exploration",
        category: Category::Entertainment,
        tags: &["music", "artists", "spotify", "streaming", "discovery"],
        featured: false,
        data_source: Some("Spotify API"),
        date_added: "2024-04-15",
        key_insight: Some(Stat { value: "10K+", label: "Artists" }),
        dataset_size: Some(Stat { value: "Live", label: "API" }),
        thumbnail: None,
    },
    Project {
        id: "charity-protocol",
        name: "Charity Protocol",
        description: "Data-driven analysis of charitable organizations and giving patterns.",
        url: "https://ericdataplus.github.io/charity-protocol/",
        repo_url: "https://github.com/Ericdataplus/charity-protocol",
        category: Category::Finance,
        tags: &["charity", "nonprofit", "donations", "social-impact"],
        featured: false,
        data_source: Some("Various"),
        date_added: "2024-05-01",
        key_insight: Some(Stat { value: "$2.1B", label: "Tracked" }),
        dataset_size: Some(Stat { value: "8K", label: "charities" }),
        thumbnail: None,
    },
    Project {
        id: "typing-game-site",
        name: "Typing Speed Game",
        description: "Prestige-like typing game to test and improve your typing speed with progression mechanics.",
        url: "https://ericdataplus.github.io/typing-game-site/",
        repo_url: "https://github.com/Ericdataplus/typing-game-site",
        category: Category::Other,
        tags: &["game", "typing", "speed", "practice", "interactive"],
        featured: false,
        data_source: Some("N/A"),
        date_added: "2024-05-15",
        key_insight: Some(Stat { value: "150+", label: "WPM Goal" }),
        dataset_size: Some(Stat { value: "1K", label: "words" }),
        thumbnail: None,
    },
];
