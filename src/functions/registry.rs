use std::sync::Arc;

use lazy_static::lazy_static;

use super::RealFn;

type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;

#[derive(Debug)]
pub struct BuiltinFunction {
    pub id:usize,
    pub name:&'static str,
    pub label:&'static str,
    callable:fn(f64) -> f64
}

impl BuiltinFunction {
    pub fn call(&self,x:f64) -> f64 {
        (self.callable)(x)
    }

    pub fn as_real_fn(&self) -> RealFn {
        Arc::new(self.callable)
    }
}

fn sin_3x_squared(x:f64) -> f64 {
    (3.0*x.powi(2)).sin()
}

fn atan_4x_plus_2(x:f64) -> f64 {
    (4.0*x + 2.0).atan()
}

fn sin_x(x:f64) -> f64 {
    x.sin()
}

fn exp_x(x:f64) -> f64 {
    x.exp()
}

lazy_static! {
    // registration order is the order functions are offered in
    static ref BUILTINS:Vec<BuiltinFunction> = vec![
        BuiltinFunction { id:1, name:"sin_3x_squared", label:"sin(3x²)", callable:sin_3x_squared },
        BuiltinFunction { id:2, name:"atan_4x_plus_2", label:"atan(4x + 2)", callable:atan_4x_plus_2 },
        BuiltinFunction { id:3, name:"sin_x", label:"sin(x)", callable:sin_x },
        BuiltinFunction { id:4, name:"exp_x", label:"eˣ", callable:exp_x },
    ];

    // id -> index into BUILTINS
    static ref BY_ID:HashMap<usize,usize> = {
        let mut map = HashMap::with_capacity_and_hasher(BUILTINS.len(),nohash::BuildNoHashHasher::default());
        for (index,function) in BUILTINS.iter().enumerate() {
            let previous = map.insert(function.id,index);
            debug_assert!(previous.is_none(),"duplicate builtin id {}",function.id);
        }
        map
    };
}

pub fn builtins() -> &'static [BuiltinFunction] {
    &BUILTINS
}

pub fn by_id(id:usize) -> Option<&'static BuiltinFunction> {
    BY_ID.get(&id).map(|index| &BUILTINS[*index])
}

pub fn by_name(name:&str) -> Option<&'static BuiltinFunction> {
    BUILTINS.iter().find(|function| function.name == name)
}
