//! Transaction template catalog: the taxonomy synthetic transactions are drawn from.
//!
//! Each category carries a description pool, an amount range and an integer
//! frequency weight (1-10). Selection builds a pool where every category index
//! appears `weight` times and draws uniformly from it, so a category's chance is
//! `weight / total_weight`. Grocery and online purchases dominate withdrawals.

use crate::error::{Result, StatementError};
use crate::money::{round_cents, to_cents};
use crate::transaction::TxnKind;
use lazy_static::lazy_static;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 10;
/// Weight assumed when a catalog file omits one
pub const DEFAULT_WEIGHT: u8 = 5;

fn default_weight() -> u8 {
    DEFAULT_WEIGHT
}

/// Closed amount interval in currency units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AmountRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl AmountRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Bounds in whole cents, after rounding each end to 2 decimals
    pub fn cents(&self) -> (i128, i128) {
        (to_cents(self.min), to_cents(self.max))
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= round_cents(self.min) && amount <= round_cents(self.max)
    }
}

/// One entry of the taxonomy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionCategory {
    pub kind: TxnKind,
    pub category: String,
    pub descriptions: Vec<String>,
    pub amount_range: AmountRange,
    #[serde(default = "default_weight")]
    pub weight: u8,
}

impl TransactionCategory {
    fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(StatementError::invalid("catalog category with an empty name"));
        }
        if self.descriptions.is_empty() {
            return Err(StatementError::invalid(format!(
                "category '{}' has an empty description pool",
                self.category
            )));
        }
        let range = &self.amount_range;
        if range.min < Decimal::ZERO || range.min > range.max {
            return Err(StatementError::invalid(format!(
                "category '{}' has an invalid amount range [{}, {}]",
                self.category, range.min, range.max
            )));
        }
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&self.weight) {
            return Err(StatementError::invalid(format!(
                "category '{}' weight {} is outside {}..={}",
                self.category, self.weight, MIN_WEIGHT, MAX_WEIGHT
            )));
        }
        Ok(())
    }

    pub fn pick_description<R: Rng>(&self, rng: &mut R) -> &str {
        &self.descriptions[rng.random_range(0..self.descriptions.len())]
    }

    /// Uniform draw over the range at cent granularity
    pub fn pick_amount<R: Rng>(&self, rng: &mut R) -> Decimal {
        let (lo, hi) = self.amount_range.cents();
        crate::money::from_cents(rng.random_range(lo..=hi))
    }
}

/// Validated, immutable set of categories plus the expanded selection pool
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<TransactionCategory>,
    pool: Vec<usize>,
}

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::assemble(builtin_categories());
}

impl Catalog {
    /// Build a catalog from caller-supplied categories, rejecting malformed entries.
    pub fn new(categories: Vec<TransactionCategory>) -> Result<Self> {
        let catalog = Self::assemble(categories);
        catalog.self_check()?;
        Ok(catalog)
    }

    /// The process-wide default table.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    fn assemble(categories: Vec<TransactionCategory>) -> Self {
        let pool = categories
            .iter()
            .enumerate()
            .flat_map(|(i, c)| std::iter::repeat_n(i, c.weight as usize))
            .collect();
        Self { categories, pool }
    }

    /// Integrity check run at startup: every category must be usable.
    pub fn self_check(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(StatementError::invalid("catalog has no categories"));
        }
        for c in &self.categories {
            c.validate()?;
        }
        Ok(())
    }

    pub fn list_categories(&self) -> &[TransactionCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&TransactionCategory> {
        self.categories.iter().find(|c| c.category == name)
    }

    pub fn total_weight(&self) -> usize {
        self.pool.len()
    }

    /// Probability that a single draw lands on `name`
    pub fn selection_share(&self, name: &str) -> Option<f64> {
        let c = self.get(name)?;
        Some(c.weight as f64 / self.total_weight() as f64)
    }

    pub fn pick_weighted<R: Rng>(&self, rng: &mut R) -> &TransactionCategory {
        let idx = self.pool[rng.random_range(0..self.pool.len())];
        &self.categories[idx]
    }
}

fn entry(
    kind: TxnKind,
    category: &str,
    descriptions: &[&str],
    min: Decimal,
    max: Decimal,
    weight: u8,
) -> TransactionCategory {
    TransactionCategory {
        kind,
        category: category.to_string(),
        descriptions: descriptions.iter().map(|d| d.to_string()).collect(),
        amount_range: AmountRange::new(min, max),
        weight,
    }
}

fn builtin_categories() -> Vec<TransactionCategory> {
    use TxnKind::{Deposit, Withdrawal};

    vec![
        // Deposits
        entry(
            Deposit,
            "Payroll",
            &["PAYROLL ACH DEPOSIT", "DIRECT DEPOSIT PAYROLL", "SALARY DEPOSIT"],
            dec!(1000),
            dec!(5000),
            8,
        ),
        entry(
            Deposit,
            "Transfer",
            &["ONLINE TRANSFER", "MOBILE DEPOSIT", "WIRE TRANSFER", "ACH TRANSFER"],
            dec!(100),
            dec!(2000),
            6,
        ),
        entry(
            Deposit,
            "Interest",
            &["INTEREST PAYMENT", "SAVINGS INTEREST", "CHECKING INTEREST"],
            dec!(0.50),
            dec!(25),
            3,
        ),
        entry(
            Deposit,
            "Refund",
            &["TAX REFUND", "PURCHASE REFUND", "CASHBACK REWARD", "RETURN CREDIT"],
            dec!(10),
            dec!(500),
            4,
        ),
        entry(
            Deposit,
            "Check Deposit",
            &["MOBILE CHECK DEPOSIT", "ATM CHECK DEPOSIT", "BRANCH CHECK DEPOSIT"],
            dec!(50),
            dec!(1000),
            5,
        ),
        // Withdrawals
        entry(
            Withdrawal,
            "Grocery Store",
            &[
                "WHOLE FOODS MARKET #123", "SAFEWAY STORE #456", "KROGER #789",
                "WALMART SUPERCENTER #012", "TARGET STORE #345", "COSTCO WHOLESALE #678",
                "TRADER JOES #901", "PUBLIX SUPER MARKET #234", "HARRIS TEETER #567",
                "FOOD LION #890", "GIANT FOOD #123", "STOP & SHOP #456", "WEGMANS #789",
                "H-E-B #012", "MEIJER #345", "ALDI #678",
            ],
            dec!(25),
            dec!(200),
            9,
        ),
        entry(
            Withdrawal,
            "Restaurant",
            &[
                "STARBUCKS STORE #345", "MCDONALDS #678", "CHIPOTLE MEXICAN GRILL", "SUBWAY #901",
                "PANERA BREAD #234", "CHICK-FIL-A #567", "TACO BELL #890", "PIZZA HUT #123",
                "DOMINOS PIZZA #456", "OLIVE GARDEN #789", "APPLEBEES #012", "CHILIS #345",
                "OUTBACK STEAKHOUSE", "RED LOBSTER #678", "BUFFALO WILD WINGS", "DENNYS #901",
                "IHOP #234", "CRACKER BARREL #567", "TEXAS ROADHOUSE", "FIVE GUYS #890",
            ],
            dec!(8),
            dec!(75),
            8,
        ),
        entry(
            Withdrawal,
            "Gas Station",
            &[
                "SHELL OIL #234", "CHEVRON #567", "EXXON MOBIL #890", "BP GAS STATION #123",
                "TEXACO #456", "MARATHON #789", "SUNOCO #012", "CITGO #345", "VALERO #678",
                "SPEEDWAY #901", "WAWA #234", "SHEETZ #567", "7-ELEVEN #890", "CIRCLE K #123",
                "CASEY'S GENERAL STORE", "PILOT TRAVEL CENTER",
            ],
            dec!(25),
            dec!(85),
            7,
        ),
        entry(
            Withdrawal,
            "Online Purchase",
            &[
                "AMAZON.COM AMZN.COM/BILL", "PAYPAL *MERCHANT", "APPLE.COM/BILL", "NETFLIX.COM",
                "SPOTIFY USA", "HULU", "DISNEY PLUS", "HBO MAX", "YOUTUBE PREMIUM",
                "MICROSOFT STORE", "GOOGLE PLAY", "STEAM PURCHASE", "EBAY.COM", "ETSY.COM",
                "WALMART.COM", "TARGET.COM", "BESTBUY.COM", "HOMEDEPOT.COM",
            ],
            dec!(10),
            dec!(300),
            9,
        ),
        entry(
            Withdrawal,
            "ATM Withdrawal",
            &[
                "ATM WITHDRAWAL - MAIN ST", "CASH WITHDRAWAL - DOWNTOWN", "ATM FEE - BANK LOCATION",
                "ATM WITHDRAWAL - MALL", "CASH ADVANCE - ATM", "ATM WITHDRAWAL - AIRPORT",
                "ATM WITHDRAWAL - GROCERY", "ATM WITHDRAWAL - GAS STATION",
            ],
            dec!(20),
            dec!(300),
            6,
        ),
        entry(
            Withdrawal,
            "Utility Bill",
            &[
                "ELECTRIC COMPANY AUTO PAY", "WATER DEPT MONTHLY", "INTERNET SERVICE PROVIDER",
                "CABLE TV MONTHLY", "CELL PHONE BILL", "NATURAL GAS COMPANY", "TRASH SERVICE",
                "SEWER SERVICE", "SECURITY SYSTEM", "HOME INSURANCE",
            ],
            dec!(35),
            dec!(250),
            5,
        ),
        entry(
            Withdrawal,
            "Transportation",
            &[
                "UBER TRIP", "LYFT RIDE", "METRO TRANSIT", "PARKING METER", "TOLL ROAD",
                "CAR INSURANCE", "AUTO REPAIR SHOP", "OIL CHANGE", "CAR WASH", "PARKING GARAGE",
            ],
            dec!(5),
            dec!(150),
            6,
        ),
        entry(
            Withdrawal,
            "Entertainment",
            &[
                "MOVIE THEATER", "CONCERT VENUE", "SPORTS EVENT", "BOWLING ALLEY", "MINI GOLF",
                "ARCADE", "THEME PARK", "MUSEUM", "ZOO", "AQUARIUM",
            ],
            dec!(15),
            dec!(100),
            4,
        ),
        entry(
            Withdrawal,
            "Shopping",
            &[
                "DEPARTMENT STORE", "CLOTHING STORE", "ELECTRONICS STORE", "BOOKSTORE", "PHARMACY",
                "HARDWARE STORE", "SPORTING GOODS", "JEWELRY STORE", "FURNITURE STORE",
                "HOME GOODS STORE",
            ],
            dec!(20),
            dec!(500),
            7,
        ),
        entry(
            Withdrawal,
            "Healthcare",
            &[
                "DOCTORS OFFICE", "DENTIST OFFICE", "PHARMACY PRESCRIPTION", "URGENT CARE",
                "HOSPITAL", "VETERINARIAN", "OPTOMETRIST", "PHYSICAL THERAPY",
            ],
            dec!(25),
            dec!(300),
            3,
        ),
        entry(
            Withdrawal,
            "Financial Services",
            &[
                "CREDIT CARD PAYMENT", "LOAN PAYMENT", "MORTGAGE PAYMENT", "STUDENT LOAN",
                "INVESTMENT TRANSFER", "SAVINGS TRANSFER", "RETIREMENT CONTRIBUTION",
            ],
            dec!(100),
            dec!(2000),
            5,
        ),
        entry(
            Withdrawal,
            "Digital Payment",
            &[
                "CASH APP PAYMENT", "VENMO PAYMENT", "ZELLE TRANSFER", "PAYPAL TRANSFER",
                "APPLE PAY CASH", "GOOGLE PAY", "FACEBOOK PAY",
            ],
            dec!(10),
            dec!(200),
            7,
        ),
        entry(
            Withdrawal,
            "Subscription",
            &[
                "NETFLIX MONTHLY", "SPOTIFY PREMIUM", "AMAZON PRIME", "ADOBE CREATIVE",
                "MICROSOFT 365", "DROPBOX", "ICLOUD STORAGE", "GYM MEMBERSHIP",
                "MAGAZINE SUBSCRIPTION", "NEWS SUBSCRIPTION",
            ],
            dec!(5),
            dec!(50),
            6,
        ),
    ]
}
