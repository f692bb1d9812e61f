//! Word lists for generated names.

pub const FIRST_NAMES: &[&str] = &[
    "Aaron", "Adam", "Aiden", "Alex", "Alfie", "Andrew", "Archie", "Ben", "Billy", "Callum",
    "Charlie", "Chris", "Connor", "Daniel", "Danny", "David", "Dylan", "Ethan", "Finley", "Fraser",
    "Freddie", "George", "Harry", "Harvey", "Isaac", "Jack", "Jacob", "Jake", "James", "Jamie",
    "Jordan", "Joe", "Joel", "Josh", "Kieran", "Kyle", "Lewis", "Liam", "Louis", "Luke",
    "Marcus", "Mark", "Mason", "Matt", "Max", "Michael", "Nathan", "Oliver", "Oscar", "Owen",
    "Reece", "Rhys", "Ryan", "Sam", "Scott", "Sean", "Stephen", "Theo", "Tom", "Tyler",
];

pub const LAST_NAMES: &[&str] = &[
    "Adams", "Allen", "Bailey", "Baker", "Barnes", "Bell", "Bennett", "Brooks", "Brown", "Butler",
    "Campbell", "Carter", "Clarke", "Collins", "Cook", "Cooper", "Davies", "Dixon", "Edwards",
    "Ellis", "Evans", "Fisher", "Fletcher", "Foster", "Graham", "Gray", "Green", "Hall", "Harris",
    "Hill", "Holmes", "Hughes", "Hunt", "Jackson", "James", "Johnson", "Jones", "Kelly", "King",
    "Knight", "Lee", "Lewis", "Marshall", "Mason", "Mills", "Mitchell", "Moore", "Morgan",
    "Morris", "Murphy", "Murray", "Owen", "Palmer", "Parker", "Phillips", "Price", "Reid",
    "Richards", "Roberts", "Robinson", "Rogers", "Russell", "Scott", "Shaw", "Simpson", "Smith",
    "Stevens", "Taylor", "Thomas", "Thompson", "Turner", "Walker", "Ward", "Watson", "White",
    "Wilkinson", "Williams", "Wilson", "Wood", "Wright", "Young",
];

pub const CITIES: &[&str] = &[
    "Aldershot", "Barnsley", "Blackburn", "Bolton", "Bradford", "Brentford", "Bristol",
    "Burnley", "Bury", "Cambridge", "Carlisle", "Chester", "Colchester", "Coventry", "Crewe",
    "Darlington", "Derby", "Doncaster", "Exeter", "Gillingham", "Grimsby", "Halifax",
    "Hartlepool", "Hereford", "Huddersfield", "Hull", "Ipswich", "Leyton", "Lincoln", "Luton",
    "Mansfield", "Newport", "Northampton", "Norwich", "Oldham", "Oxford", "Peterborough",
    "Plymouth", "Portsmouth", "Preston", "Reading", "Rochdale", "Rotherham", "Scunthorpe",
    "Sheffield", "Shrewsbury", "Southend", "Stockport", "Stoke", "Swindon", "Torquay",
    "Tranmere", "Walsall", "Watford", "Wigan", "Wimbledon", "Wrexham", "Wycombe", "Yeovil",
    "York",
];

/// Club suffixes. The empty suffix yields a bare city name.
pub const TEAM_SUFFIXES: &[&str] = &[
    "Albion", "Argyle", "Athletic", "City", "County", "Dons", "FC", "Forest", "Hotspur",
    "North End", "Orient", "Palace", "Rangers", "Rovers", "Swifts", "Town", "United",
    "Wanderers", "Wednesday", "",
];

pub const COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Belgium", "Brazil", "Cameroon", "Canada", "Colombia", "Croatia",
    "Denmark", "Egypt", "England", "France", "Germany", "Ghana", "Iceland", "Ireland", "Italy",
    "Jamaica", "Japan", "Mexico", "Morocco", "Netherlands", "New Zealand", "Nigeria",
    "Northern Ireland", "Norway", "Poland", "Portugal", "Scotland", "Senegal", "Serbia",
    "South Korea", "Spain", "Sweden", "Switzerland", "United States", "Uruguay", "Wales",
];
