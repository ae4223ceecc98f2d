/*!
greedy-routing-lib
=====

This crate decides the route of packets in ring, torus and star interconnection networks. At each node a packet visits, a routing chooses the channel by which it continues, or tells that the packet has arrived.

# Usage

This crate is `greedy-routing-lib`. To use it add `greedy-routing-lib` to your dependencies in your project's `Cargo.toml`.

```toml
[dependencies]
greedy-routing-lib = "0.1"
```

# Public Interface

A simulation driver builds a `Network` and a `Routing` from `ConfigurationValue`s, keeps a `ChannelLoads` with the packets queued at each channel, and for every hop of every packet calls
```ignore
routing.route_packet(&*network, &loads, current, &packet, &rng)?
```
which answers `None` when `current` is the destination of `packet` and otherwise a channel at `current`. The routing never writes the loads; the driver updates them between decisions.

The random number generator is a `RefCell<rand::rngs::StdRng>`, only used to break ties. Seed it to get reproducible decisions.

# Configuration Syntax

Networks and routings are described by a `ConfigurationValue`, defined as following.

```
pub enum ConfigurationValue
{
	Literal(String),
	Number(f64),
	Object(String,Vec<(String,ConfigurationValue)>),
	Array(Vec<ConfigurationValue>),
	True,
	False,
	None,
}
```

* An `Object` is written `Name { key1 : value1, key2 : value2, [...] }`.
* An `Array` is written `[value1, value2, value3, [...]]`.
* A `Number` can be written like 2 or 3.1. Stored as a `f64`.
* A `Literal` is a double-quoted string.
* `True` is written `true` and `False` is written `false`.

## Example

A torus network enumerating paths of up to 6 hops, and a greedy routing comparing those paths.

```ignore
Torus
{
	sides: [4,4],
	paths: Simple { max_length: 6 },
}
GreedyPath
{
	topology: Torus { sides: [4,4] },
	legend_name: "greedy path",
}
```

See [`new_network`](network/fn.new_network.html) and [`new_routing`](routing/fn.new_routing.html) for the available objects.

# Plugging

Both builders receive a `&Plugs` argument that may be used to provide new implementations of `Network` and `Routing`. Plugged builders are consulted before the predefined ones.

*/

pub mod config;
pub mod error;
pub mod network;
pub mod topology;
pub mod selection;
pub mod routing;

use std::collections::BTreeMap;
use std::fmt::Debug;

use error::Error;
use network::{Network,NetworkBuilderArgument};
use routing::{Routing,RoutingBuilderArgument};

///Builders provided by the user, indexed by the name of the object they build.
#[derive(Default)]
pub struct Plugs
{
	routings: BTreeMap<String, fn(RoutingBuilderArgument) -> Result<Box<dyn Routing>,Error> >,
	networks: BTreeMap<String, fn(NetworkBuilderArgument) -> Result<Box<dyn Network>,Error> >,
}

impl Plugs
{
	pub fn add_routing(&mut self, key:String, builder:fn(RoutingBuilderArgument) -> Result<Box<dyn Routing>,Error>)
	{
		self.routings.insert(key,builder);
	}
	pub fn add_network(&mut self, key:String, builder:fn(NetworkBuilderArgument) -> Result<Box<dyn Network>,Error>)
	{
		self.networks.insert(key,builder);
	}
}

impl Debug for Plugs
{
	fn fmt(&self,f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		write!(f,"{};",self.routings.keys().map(|s|s.to_string()).collect::<Vec<String>>().join(","))?;
		write!(f,"{};",self.networks.keys().map(|s|s.to_string()).collect::<Vec<String>>().join(","))?;
		Ok(())
	}
}
