use fxhash::FxBuildHasher;

// Map
pub type Map<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

// Set
pub type Set<T> = hashbrown::HashSet<T, FxBuildHasher>;
