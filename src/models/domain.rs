use serde::{Deserialize, Serialize};

/// Living-space scale as the quiz presents it to the user.
///
/// The variants are declared in ascending order so the derived `Ord`
/// matches the ordinal semantics (a `House` user can accommodate anything
/// an `Apartment` user can).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceLevel {
    Tiny,
    Apartment,
    House,
}

impl SpaceLevel {
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceLevel::Tiny => "tiny",
            SpaceLevel::Apartment => "apartment",
            SpaceLevel::House => "house",
        }
    }
}

/// Budget scale shared by user constraints and breed requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }
}

/// Time scale. Doubles as the energy-level column on store rows: a breed's
/// energy level is the time commitment it demands from the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLevel {
    Low,
    Medium,
    High,
}

impl TimeLevel {
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeLevel::Low => "low",
            TimeLevel::Medium => "medium",
            TimeLevel::High => "high",
        }
    }
}

/// The breed store's `min_space` column. Coarser than [`SpaceLevel`]:
/// `Small` and `Medium` both project onto an apartment-sized home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinSpace {
    Small,
    Medium,
    Large,
}

impl MinSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinSpace::Small => "small",
            MinSpace::Medium => "medium",
            MinSpace::Large => "large",
        }
    }
}

/// What a breed demands from its owner, on the user-facing scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedNeeds {
    pub space: SpaceLevel,
    pub budget: BudgetTier,
    pub time: TimeLevel,
}

impl BreedNeeds {
    /// Sum of the three requirement ranks. Lower means the breed is easier
    /// to accommodate; used to pick the least-demanding compromise.
    pub fn demand_rank(&self) -> u8 {
        self.space.rank() + self.budget.rank() + self.time.rank()
    }
}

/// A breed projected into display shape, shared by the static catalog and
/// rows mapped out of the breed store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    pub needs: BreedNeeds,
}

/// A raw row from the hosted breed store, as the table stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreBreedRow {
    pub id: String,
    pub breed_name: String,
    pub category: String,
    pub min_space: MinSpace,
    pub energy_level: TimeLevel,
    pub budget_tier: BudgetTier,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<StoreBreedRow> for BreedRecord {
    fn from(row: StoreBreedRow) -> Self {
        // small and medium breeds both fit an apartment-sized home; only
        // large breeds demand a house
        let space = match row.min_space {
            MinSpace::Small | MinSpace::Medium => SpaceLevel::Apartment,
            MinSpace::Large => SpaceLevel::House,
        };

        BreedRecord {
            id: row.id,
            name: row.breed_name,
            category: row.category,
            description: row.description,
            image_url: row.image_url,
            needs: BreedNeeds {
                space,
                budget: row.budget_tier,
                time: row.energy_level,
            },
        }
    }
}

/// The user's derived lifestyle answers. Produced once per quiz session and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConstraints {
    pub space: SpaceLevel,
    pub budget: BudgetTier,
    pub time: TimeLevel,
}

impl UserConstraints {
    /// True when the user can afford everything the breed needs: their rank
    /// on each axis independently meets or exceeds the breed's requirement.
    pub fn covers(&self, needs: &BreedNeeds) -> bool {
        self.space >= needs.space && self.budget >= needs.budget && self.time >= needs.time
    }
}

/// One recommendation, created fresh per match request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub breed: BreedRecord,
    #[serde(rename = "isCompromise")]
    pub is_compromise: bool,
    #[serde(rename = "whyItFits")]
    pub why_it_fits: Option<String>,
}

/// A composable predicate against the breed store. Conjunction is implied:
/// a query is a list of filters that must all hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFilter {
    /// Column equals the value.
    Eq(&'static str, String),
    /// Column is one of the values.
    In(&'static str, Vec<String>),
    /// Column differs from the value.
    Neq(&'static str, String),
    /// Array column does not contain the value.
    NotContains(&'static str, String),
}

impl StoreFilter {
    /// Reference semantics of the operators, used by in-memory stores in
    /// tests. The hosted client translates each variant to the equivalent
    /// PostgREST operator instead.
    pub fn matches(&self, row: &StoreBreedRow) -> bool {
        match self {
            StoreFilter::Eq(col, value) => {
                Self::column(row, col).as_deref() == Some(value.as_str())
            }
            StoreFilter::In(col, values) => Self::column(row, col)
                .map(|v| values.contains(&v))
                .unwrap_or(false),
            StoreFilter::Neq(col, value) => {
                Self::column(row, col).as_deref() != Some(value.as_str())
            }
            StoreFilter::NotContains(col, value) => {
                if *col == columns::TAGS {
                    !row.tags.contains(value)
                } else {
                    true
                }
            }
        }
    }

    fn column(row: &StoreBreedRow, col: &str) -> Option<String> {
        match col {
            columns::CATEGORY => Some(row.category.clone()),
            columns::MIN_SPACE => Some(row.min_space.as_str().to_string()),
            columns::ENERGY_LEVEL => Some(row.energy_level.as_str().to_string()),
            columns::BUDGET_TIER => Some(row.budget_tier.as_str().to_string()),
            _ => None,
        }
    }
}

/// Column names of the breed table.
pub mod columns {
    pub const CATEGORY: &str = "category";
    pub const MIN_SPACE: &str = "min_space";
    pub const ENERGY_LEVEL: &str = "energy_level";
    pub const BUDGET_TIER: &str = "budget_tier";
    pub const TAGS: &str = "tags";
}

/// Pet size buckets indexing the cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetSize {
    Cat,
    SmallDog,
    MediumDog,
    LargeDog,
}

impl PetSize {
    pub const ALL: [PetSize; 4] = [
        PetSize::Cat,
        PetSize::SmallDog,
        PetSize::MediumDog,
        PetSize::LargeDog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetSize::Cat => "cat",
            PetSize::SmallDog => "small_dog",
            PetSize::MediumDog => "medium_dog",
            PetSize::LargeDog => "large_dog",
        }
    }
}

/// Spending level indexing the cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Budget,
    Standard,
    Premium,
}

impl CostTier {
    pub const ALL: [CostTier; 3] = [CostTier::Budget, CostTier::Standard, CostTier::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostTier::Budget => "budget",
            CostTier::Standard => "standard",
            CostTier::Premium => "premium",
        }
    }
}

/// One line item in the cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub id: String,
    pub label: String,
    pub amount: f64,
    #[serde(rename = "amazonKeyword")]
    pub amazon_keyword: String,
}

/// One cell of the cost table: the line items for a (size, tier) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCell {
    #[serde(rename = "oneTime")]
    pub one_time: Vec<CostItem>,
    pub monthly: Vec<CostItem>,
}

/// Totals computed over one cost cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(rename = "oneTime")]
    pub one_time: Vec<CostItem>,
    pub monthly: Vec<CostItem>,
    #[serde(rename = "oneTimeTotal")]
    pub one_time_total: f64,
    #[serde(rename = "monthlyTotal")]
    pub monthly_total: f64,
    #[serde(rename = "annualTotal")]
    pub annual_total: f64,
    #[serde(rename = "firstYearTotal")]
    pub first_year_total: f64,
}

/// A community feed post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: uuid::Uuid,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub content: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "likesCount")]
    pub likes_count: i32,
    #[serde(rename = "isOfficial")]
    pub is_official: bool,
    pub category: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Sort order for the community feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSort {
    Latest,
    Oldest,
}

/// A trimmed post used by the trending widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingPost {
    pub id: uuid::Uuid,
    pub content: String,
    #[serde(rename = "likesCount")]
    pub likes_count: i32,
}

/// An owner review of a breed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: uuid::Uuid,
    #[serde(rename = "petBreed")]
    pub pet_breed: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub rating: i32,
    pub content: String,
    #[serde(rename = "contextTags")]
    pub context_tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One name suggestion from the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedName {
    pub name: String,
    pub meaning: String,
}
