use std::fmt;
use std::hash::Hash;
use std::ops::RangeInclusive;

use fixed_map::{Key, Map as FixedMap};

/// A linguistic term of one variable. The implementing enum *is* the variable:
/// its associated constants describe the variable as a whole and its variants
/// are the terms, listed in membership-vector order by `ALL`.
pub trait Term: Key + Copy + Eq + Hash + fmt::Debug + 'static {
    /// Variable name as it appears in rule text
    const VARIABLE: &'static str;
    const ALL: [Self; 3];
    /// Nominal universe of discourse
    const UNIVERSE: RangeInclusive<f64>;
    /// Whether crisp values outside `UNIVERSE` are rejected at the boundary
    const BOUNDED: bool;

    fn name(self) -> &'static str;

    /// Breakpoints of the piecewise-linear membership function, sorted by x
    fn points(self) -> &'static [(f64, f64)];
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum AirTemperature {
    Cold,
    Warm,
    Hot,
}

impl Term for AirTemperature {
    const VARIABLE: &'static str = "air_temperature";
    const ALL: [Self; 3] = [Self::Cold, Self::Warm, Self::Hot];
    const UNIVERSE: RangeInclusive<f64> = 0.0..=30.0;
    const BOUNDED: bool = false;

    fn name(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }

    fn points(self) -> &'static [(f64, f64)] {
        match self {
            Self::Cold => &[(0., 1.), (15., 0.)],
            Self::Warm => &[(0., 0.), (15., 1.), (30., 0.)],
            Self::Hot => &[(15., 0.), (30., 1.)],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum SoilMoisture {
    Dry,
    Medium,
    Wet,
}

impl Term for SoilMoisture {
    const VARIABLE: &'static str = "soil_moisture";
    const ALL: [Self; 3] = [Self::Dry, Self::Medium, Self::Wet];
    const UNIVERSE: RangeInclusive<f64> = 0.0..=100.0;
    const BOUNDED: bool = true;

    fn name(self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Medium => "medium",
            Self::Wet => "wet",
        }
    }

    fn points(self) -> &'static [(f64, f64)] {
        match self {
            Self::Dry => &[(25., 1.), (50., 0.)],
            Self::Medium => &[(25., 0.), (50., 1.), (75., 0.)],
            Self::Wet => &[(75., 0.), (100., 1.)],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum NeededWater {
    Little,
    Medium,
    Much,
}

impl Term for NeededWater {
    const VARIABLE: &'static str = "needed_water";
    const ALL: [Self; 3] = [Self::Little, Self::Medium, Self::Much];
    const UNIVERSE: RangeInclusive<f64> = 0.0..=100.0;
    const BOUNDED: bool = true;

    fn name(self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Medium => "medium",
            Self::Much => "much",
        }
    }

    fn points(self) -> &'static [(f64, f64)] {
        match self {
            Self::Little => &[(0., 1.), (25., 1.), (50., 0.)],
            Self::Medium => &[(25., 0.), (50., 1.), (75., 0.)],
            Self::Much => &[(50., 0.), (75., 1.), (100., 1.)],
        }
    }
}

/// A term of either input variable, as referenced by a rule condition.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InputTerm {
    AirTemperature(AirTemperature),
    SoilMoisture(SoilMoisture),
}

impl InputTerm {
    pub fn variable(self) -> &'static str {
        match self {
            Self::AirTemperature(_) => AirTemperature::VARIABLE,
            Self::SoilMoisture(_) => SoilMoisture::VARIABLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AirTemperature(t) => t.name(),
            Self::SoilMoisture(t) => t.name(),
        }
    }

    /// Looks the term's degree up in the matching input vector
    pub fn degree(
        self,
        air_temperature: &Membership<AirTemperature>,
        soil_moisture: &Membership<SoilMoisture>,
    ) -> Option<f64> {
        match self {
            Self::AirTemperature(t) => air_temperature.get(t),
            Self::SoilMoisture(t) => soil_moisture.get(t),
        }
    }
}

impl From<AirTemperature> for InputTerm {
    fn from(t: AirTemperature) -> Self {
        Self::AirTemperature(t)
    }
}

impl From<SoilMoisture> for InputTerm {
    fn from(t: SoilMoisture) -> Self {
        Self::SoilMoisture(t)
    }
}

impl fmt::Display for InputTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}", self.variable(), self.name())
    }
}

/// One membership degree per term of `K`. A term without an entry is unset,
/// which is distinct from a degree of zero.
pub struct Membership<K: Term>(FixedMap<K, f64>);

impl<K: Term> Membership<K> {
    /// All terms unset
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    /// Degrees given in term order
    pub fn from_degrees(degrees: [f64; 3]) -> Self {
        let mut this = Self::new();

        for (term, degree) in K::ALL.into_iter().zip(degrees) {
            this.set(term, degree);
        }

        this
    }

    pub fn get(&self, term: K) -> Option<f64> {
        self.0.get(term).copied()
    }

    /// Degree with unset read as zero
    pub fn degree(&self, term: K) -> f64 {
        self.get(term).unwrap_or(0.)
    }

    pub fn set(&mut self, term: K, degree: f64) {
        self.0.insert(term, degree);
    }

    pub fn is_set(&self, term: K) -> bool {
        self.0.contains_key(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, Option<f64>)> + '_ {
        K::ALL.into_iter().map(move |term| (term, self.get(term)))
    }

    pub fn to_array(&self) -> [Option<f64>; 3] {
        K::ALL.map(|term| self.get(term))
    }

    /// Sum of all degrees, unset read as zero
    pub fn total(&self) -> f64 {
        K::ALL.into_iter().map(|term| self.degree(term)).sum()
    }
}

impl<K: Term> Default for Membership<K> {
    fn default() -> Self {
        Self::new()
    }
}

// FixedMap's own impls are bounded on the generated storage type, which can't
// be named for a generic `K`
impl<K: Term> Clone for Membership<K> {
    fn clone(&self) -> Self {
        let mut this = Self::new();

        for (term, degree) in self.iter() {
            if let Some(degree) = degree {
                this.set(term, degree);
            }
        }

        this
    }
}

impl<K: Term> PartialEq for Membership<K> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<K: Term> fmt::Debug for Membership<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(term, degree)| (term.name(), degree)))
            .finish()
    }
}

impl<K: Term> fmt::Display for Membership<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (i, (_, degree)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            match degree {
                Some(degree) => write!(f, "{degree}")?,
                None => f.write_str("unset")?,
            }
        }

        f.write_str("]")
    }
}

#[test]
fn test_unset_is_not_zero() {
    let mut membership = Membership::<NeededWater>::new();

    membership.set(NeededWater::Medium, 0.);

    assert_eq!(membership.to_array(), [None, Some(0.), None]);
    assert!(!membership.is_set(NeededWater::Little));
    assert!(membership.is_set(NeededWater::Medium));
    assert_eq!(membership.degree(NeededWater::Little), 0.);
    assert_eq!(membership.to_string(), "[unset, 0, unset]");
}

#[test]
fn test_from_degrees_follows_term_order() {
    let membership = Membership::<SoilMoisture>::from_degrees([0.25, 0.75, 0.]);

    assert_eq!(membership.get(SoilMoisture::Dry), Some(0.25));
    assert_eq!(membership.get(SoilMoisture::Medium), Some(0.75));
    assert_eq!(membership.get(SoilMoisture::Wet), Some(0.));
    assert_eq!(membership.total(), 1.);
    assert_eq!(membership.clone(), membership);
}

#[test]
fn test_input_term_display() {
    assert_eq!(InputTerm::from(AirTemperature::Cold).to_string(), "air_temperature IS cold");
    assert_eq!(InputTerm::from(SoilMoisture::Wet).to_string(), "soil_moisture IS wet");
}
